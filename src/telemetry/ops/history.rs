use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct History;

#[derive(Copy, Clone, Debug)]
pub enum Phase { List, Count, Clear }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::List => "list", Phase::Count => "count", Phase::Clear => "clear" } }
    fn span(&self) -> Span { match self { Phase::List => info_span!("list"), Phase::Count => info_span!("count"), Phase::Clear => info_span!("clear") } }
}

impl OpMarker for History {
    const NAME: &'static str = "history";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("history") }
}
