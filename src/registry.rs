//! Widget declarations known to the dashboard.
//!
//! Each widget type declares a default title, a default size and optional
//! bounds. The declaration is applied once, when a widget is freshly added;
//! later edits never re-apply it.

use std::collections::BTreeMap;

use crate::layout::WidgetConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDefinition {
    pub kind: String,
    pub title: String,
    pub w: f64,
    pub h: f64,
    pub min_w: f64,
    pub min_h: f64,
    pub max_w: Option<f64>,
    pub max_h: Option<f64>,
}

impl WidgetDefinition {
    pub fn new(kind: impl Into<String>, title: impl Into<String>, w: f64, h: f64) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            w,
            h,
            min_w: 1.0,
            min_h: 1.0,
            max_w: None,
            max_h: None,
        }
    }

    #[must_use]
    pub fn with_min(mut self, min_w: f64, min_h: f64) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    #[must_use]
    pub fn with_max(mut self, max_w: f64, max_h: f64) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    definitions: BTreeMap<String, WidgetDefinition>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The RTI/MTSS widget catalogue shipped with the dashboard.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            WidgetDefinition::new("tier-distribution", "Distribuição por Tier", 6.0, 4.0)
                .with_min(3.0, 3.0),
        );
        registry.register(
            WidgetDefinition::new("domain-summary", "Resumo por Domínio", 6.0, 4.0)
                .with_min(3.0, 3.0),
        );
        registry.register(
            WidgetDefinition::new("assessment-coverage", "Cobertura de Avaliações", 12.0, 4.0)
                .with_min(4.0, 3.0),
        );
        registry.register(
            WidgetDefinition::new("progress-monitoring", "Monitoramento de Progresso", 12.0, 6.0)
                .with_min(6.0, 4.0),
        );
        registry.register(
            WidgetDefinition::new(
                "intervention-effectiveness",
                "Efetividade das Intervenções",
                6.0,
                5.0,
            )
            .with_min(4.0, 4.0)
            .with_max(12.0, 8.0),
        );
        registry.register(
            WidgetDefinition::new("students-at-risk", "Estudantes em Risco", 6.0, 6.0)
                .with_min(3.0, 4.0),
        );
        registry
    }

    pub fn register(&mut self, definition: WidgetDefinition) {
        self.definitions.insert(definition.kind.clone(), definition);
    }

    pub fn get(&self, kind: &str) -> Option<&WidgetDefinition> {
        self.definitions.get(kind)
    }

    /// Registered widget types, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build an unplaced widget of `kind` at `(x, y)` with the declared
    /// defaults. The id is left empty for the caller to assign.
    pub fn instantiate(&self, kind: &str, x: f64, y: f64) -> Option<WidgetConfig> {
        let def = self.get(kind)?;
        let mut widget = WidgetConfig::new(String::new(), def.kind.clone(), def.title.clone())
            .at(x, y, def.w, def.h)
            .with_min(def.min_w, def.min_h);
        widget.max_w = def.max_w;
        widget.max_h = def.max_h;
        Some(widget)
    }
}
