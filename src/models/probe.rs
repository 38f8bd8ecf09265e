use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// A single named GET pattern with its own success rule.
///
/// Classification is a pure function of the response status code and the
/// probe's acceptable set; it never depends on earlier responses.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub name: &'static str,
    /// Relative selection weight at each simulated user's task pick.
    pub weight: usize,
    /// Candidate paths; one is chosen uniformly at random per invocation.
    pub endpoints: &'static [&'static str],
    pub acceptable: &'static [u16],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("{probe} returned unexpected status code: {status}")]
    UnexpectedStatus { probe: &'static str, status: u16 },
}

/// OCIS homepage, the hottest path in the profile.
pub const HOMEPAGE: Probe = Probe {
    name: "Homepage",
    weight: 3,
    endpoints: &["/"],
    acceptable: &[200, 301, 302, 307, 308],
};

pub const LOGIN_PAGE: Probe = Probe {
    name: "Login Page",
    weight: 2,
    endpoints: &["/login"],
    acceptable: &[200, 301, 302, 307, 308],
};

/// Liveness probe. 404 counts as success: even a not-found response proves
/// the app is up and answering.
pub const HEALTH_CHECK: Probe = Probe {
    name: "Health Check",
    weight: 1,
    endpoints: &["/", "/health", "/status", "/app/"],
    acceptable: &[200, 301, 302, 307, 308, 404],
};

impl Probe {
    pub fn accepts(&self, status: u16) -> bool {
        self.acceptable.contains(&status)
    }

    pub fn classify(&self, status: u16) -> Result<(), ProbeError> {
        if self.accepts(status) {
            Ok(())
        } else {
            Err(ProbeError::UnexpectedStatus {
                probe: self.name,
                status,
            })
        }
    }

    pub fn pick_endpoint(&self) -> &'static str {
        self.pick_endpoint_with(&mut rand::thread_rng())
    }

    pub fn pick_endpoint_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.endpoints.choose(rng).copied().unwrap_or("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const REDIRECTS: [u16; 4] = [301, 302, 307, 308];
    const REJECTED: [u16; 12] = [100, 199, 201, 204, 400, 401, 403, 404, 418, 500, 502, 503];

    #[test]
    fn homepage_accepts_ok_and_redirects() {
        assert!(HOMEPAGE.accepts(200));
        for status in REDIRECTS {
            assert!(HOMEPAGE.accepts(status), "redirect {status} should pass");
        }
    }

    #[test]
    fn homepage_rejects_everything_else() {
        for status in REJECTED {
            let err = HOMEPAGE.classify(status).unwrap_err();
            assert!(
                err.to_string().contains(&status.to_string()),
                "message should carry the status: {err}"
            );
        }
    }

    #[test]
    fn login_page_uses_the_same_rule_as_homepage() {
        assert_eq!(LOGIN_PAGE.acceptable, HOMEPAGE.acceptable);
        assert!(LOGIN_PAGE.accepts(200));
        assert!(!LOGIN_PAGE.accepts(500));
    }

    #[test]
    fn health_check_additionally_accepts_not_found() {
        assert!(HEALTH_CHECK.accepts(404));
        assert!(HEALTH_CHECK.accepts(200));
        for status in REDIRECTS {
            assert!(HEALTH_CHECK.accepts(status));
        }
    }

    #[test]
    fn health_check_rejects_server_errors() {
        for status in [500, 502, 503, 504] {
            let err = HEALTH_CHECK.classify(status).unwrap_err();
            assert!(err.to_string().contains(&status.to_string()));
        }
    }

    #[test]
    fn failure_message_names_the_probe() {
        let err = LOGIN_PAGE.classify(503).unwrap_err();
        assert!(err.to_string().contains("Login Page"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn single_endpoint_probes_always_pick_their_path() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(HOMEPAGE.pick_endpoint_with(&mut rng), "/");
            assert_eq!(LOGIN_PAGE.pick_endpoint_with(&mut rng), "/login");
        }
    }

    #[test]
    fn health_endpoints_are_picked_roughly_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 8_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(HEALTH_CHECK.pick_endpoint_with(&mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), HEALTH_CHECK.endpoints.len());
        // expected 2000 per endpoint; allow a generous band for a seeded run
        for (endpoint, count) in counts {
            assert!(
                (1_700..=2_300).contains(&count),
                "{endpoint} drawn {count} times out of {draws}"
            );
        }
    }
}
