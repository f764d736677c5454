use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Search;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Resolve, Plan, Record, Execute }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Resolve => "resolve",
        Phase::Plan => "plan",
        Phase::Record => "record",
        Phase::Execute => "execute",
    }}
    fn span(&self) -> Span { match self {
        Phase::Resolve => info_span!("resolve"),
        Phase::Plan => info_span!("plan"),
        Phase::Record => info_span!("record"),
        Phase::Execute => info_span!("execute"),
    }}
}

impl OpMarker for Search {
    const NAME: &'static str = "search";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("search") }
}
