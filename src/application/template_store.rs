// Template store trait - operator-controlled SQL text keyed by chart shape
use crate::domain::chart::{ChartShape, ChartType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKey {
    #[default]
    LineBar,
    Pie,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 2] = [TemplateKey::LineBar, TemplateKey::Pie];

    pub fn for_chart(chart_type: ChartType) -> Self {
        match chart_type.shape() {
            ChartShape::TimeSeries => TemplateKey::LineBar,
            ChartShape::Categorical => TemplateKey::Pie,
        }
    }

    /// File stem of the template resource
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKey::LineBar => "line_bar",
            TemplateKey::Pie => "pie",
        }
    }
}

pub trait TemplateStore: Send + Sync {
    fn template(&self, key: TemplateKey) -> Option<&str>;
}
