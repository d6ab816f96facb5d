use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// MembershipFilter policy deciding which traversal rows may be reported
///
/// A row's package version is identified by `ecosystem:name:version`. With
/// `SubmittedOnly` it is reported only when that key matches a coordinate of
/// the dependency list that produced the traversal. `Disabled` reports every
/// vulnerable package reached by an edge, whatever list produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipFilter {
    #[default]
    SubmittedOnly,
    Disabled,
}

impl MembershipFilter {
    /// Whether `joined_key` passes the filter given the submitted keys
    pub fn admits(&self, joined_key: &str, submitted_keys: &HashSet<String>) -> bool {
        match self {
            MembershipFilter::SubmittedOnly => submitted_keys.contains(joined_key),
            MembershipFilter::Disabled => true,
        }
    }
}

impl FromStr for MembershipFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" | "submitted_only" => Ok(MembershipFilter::SubmittedOnly),
            "disabled" | "none" => Ok(MembershipFilter::Disabled),
            _ => Err(format!(
                "Invalid membership filter: {}. Please specify 'submitted' or 'disabled'",
                s
            )),
        }
    }
}

impl fmt::Display for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipFilter::SubmittedOnly => write!(f, "submitted"),
            MembershipFilter::Disabled => write!(f, "disabled"),
        }
    }
}
