mod dialing_plan;
mod prefix;

pub use dialing_plan::DialingPlanResolver;
pub use prefix::GulfPrefixResolver;

/// Fallback category of the fixed-prefix strategy.
pub const OTHER_COUNTRY: &str = "Other";
/// Dialing-plan strategy: the number parsed but its code is unassigned.
pub const UNKNOWN_COUNTRY: &str = "Unknown";
/// Dialing-plan strategy: the identifier is not a plausible phone number.
pub const INVALID_COUNTRY: &str = "Invalid";

/// Maps a recipient identifier to a country name. Implementations are total:
/// every input resolves to a country or a sentinel category, never an error.
pub trait CountryResolver: Send + Sync {
    fn name(&self) -> &'static str;
    fn resolve(&self, identifier: &str) -> &'static str;
}

/// The two resolution strategies the report generations shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    /// Fixed prefix table maintained by campaign operations. Fast, closed
    /// country set, `Other` for everything else.
    Prefix,
    /// Full international dialing-plan lookup. Open country set with
    /// `Unknown`/`Invalid` sentinels.
    #[default]
    DialingPlan,
}

static PREFIX: GulfPrefixResolver = GulfPrefixResolver;
static DIALING_PLAN: DialingPlanResolver = DialingPlanResolver;

pub fn resolver_for(kind: ResolverKind) -> &'static dyn CountryResolver {
    match kind {
        ResolverKind::Prefix => &PREFIX,
        ResolverKind::DialingPlan => &DIALING_PLAN,
    }
}
