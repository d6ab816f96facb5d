mod membership_filter;

pub use membership_filter::MembershipFilter;
