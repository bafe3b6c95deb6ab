//! Route guard policies.
//!
//! Pure decisions from (principal, required policy) to allow-or-redirect.
//! A denial is normal control flow, not an error: it is never logged and
//! never surfaced as a failure. Gates only steer navigation; the server
//! enforces authorization on every request regardless of what a gate
//! decided.

use crate::principal::{Principal, Role};

/// Redirect destinations a gate can steer to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// The login screen.
    Login,
    /// The staff dashboard (machines, sessions, revenue at a glance).
    Overview,
    /// A member's personal profile and balance.
    Profile,
}

/// Outcome of a gate check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(RouteTarget),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Access requirement a routing layer attaches to a navigable region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any signed-in principal.
    Authenticated,
    /// Staff only (operator or admin).
    Elevated,
    /// Exactly the operator role.
    Privileged,
}

/// Default route for a signed-in principal.
///
/// Members land on their profile; staff land on the overview dashboard.
pub fn landing_route(principal: &Principal) -> RouteTarget {
    match principal.role {
        Role::Member => RouteTarget::Profile,
        Role::Operator | Role::Admin => RouteTarget::Overview,
    }
}

/// Deny anonymous visitors.
pub fn authenticated_gate(principal: Option<&Principal>) -> GateDecision {
    match principal {
        Some(_) => GateDecision::Allow,
        None => GateDecision::Redirect(RouteTarget::Login),
    }
}

/// Staff-only screens: members are sent back to their landing route.
pub fn elevated_gate(principal: Option<&Principal>) -> GateDecision {
    match principal {
        None => GateDecision::Redirect(RouteTarget::Login),
        Some(p) => match p.role {
            Role::Member => GateDecision::Redirect(landing_route(p)),
            Role::Operator | Role::Admin => GateDecision::Allow,
        },
    }
}

/// Operator-only screens: every other role is sent to its landing route.
pub fn privileged_gate(principal: Option<&Principal>) -> GateDecision {
    match principal {
        None => GateDecision::Redirect(RouteTarget::Login),
        Some(p) => match p.role {
            Role::Operator => GateDecision::Allow,
            Role::Member | Role::Admin => GateDecision::Redirect(landing_route(p)),
        },
    }
}

/// Evaluate the policy a route declares against the current principal.
pub fn evaluate(policy: AccessPolicy, principal: Option<&Principal>) -> GateDecision {
    match policy {
        AccessPolicy::Authenticated => authenticated_gate(principal),
        AccessPolicy::Elevated => elevated_gate(principal),
        AccessPolicy::Privileged => privileged_gate(principal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Principal {
        Principal::new("m@club.example", Role::Member)
    }

    fn operator() -> Principal {
        Principal::new("o@club.example", Role::Operator)
    }

    fn admin() -> Principal {
        Principal::new("a@club.example", Role::Admin)
    }

    #[test]
    fn anonymous_is_redirected_to_login_by_every_gate() {
        for policy in [
            AccessPolicy::Authenticated,
            AccessPolicy::Elevated,
            AccessPolicy::Privileged,
        ] {
            assert_eq!(
                evaluate(policy, None),
                GateDecision::Redirect(RouteTarget::Login)
            );
        }
    }

    #[test]
    fn authenticated_gate_admits_every_role() {
        for principal in [member(), operator(), admin()] {
            assert_eq!(authenticated_gate(Some(&principal)), GateDecision::Allow);
        }
    }

    #[test]
    fn elevated_gate_decision_table() {
        assert_eq!(
            elevated_gate(Some(&member())),
            GateDecision::Redirect(RouteTarget::Profile)
        );
        assert_eq!(elevated_gate(Some(&operator())), GateDecision::Allow);
        assert_eq!(elevated_gate(Some(&admin())), GateDecision::Allow);
    }

    #[test]
    fn privileged_gate_decision_table() {
        assert_eq!(
            privileged_gate(Some(&member())),
            GateDecision::Redirect(RouteTarget::Profile)
        );
        assert_eq!(privileged_gate(Some(&operator())), GateDecision::Allow);
        assert_eq!(
            privileged_gate(Some(&admin())),
            GateDecision::Redirect(RouteTarget::Overview)
        );
    }

    #[test]
    fn landing_routes_by_role() {
        assert_eq!(landing_route(&member()), RouteTarget::Profile);
        assert_eq!(landing_route(&operator()), RouteTarget::Overview);
        assert_eq!(landing_route(&admin()), RouteTarget::Overview);
    }
}
