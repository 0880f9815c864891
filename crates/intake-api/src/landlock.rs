//! Landlock sandbox setup for Linux.
//!
//! Best-effort: if Landlock is unavailable or setup fails (older kernel, missing
//! permissions), we log and continue without sandboxing.

#[cfg(target_os = "linux")]
pub mod linux {
    use landlock::{
        path_beneath_rules, Access, AccessFs, Ruleset, RulesetAttr, RulesetCreatedAttr,
        RulesetStatus, ABI,
    };
    use std::path::Path;
    use tracing::{info, warn};

    /// Restrict the process filesystem access.
    ///
    /// Policy:
    /// - Read-only access to the whole filesystem (static files, certificates, locale data)
    /// - Full access beneath `writable` (applications root and staging directory)
    pub fn init(writable: &[&Path]) {
        let abi = ABI::V1;
        let access_all = AccessFs::from_all(abi);
        let access_read = AccessFs::from_read(abi);

        let result = Ruleset::default()
            .handle_access(access_all)
            .and_then(|r| r.create())
            .and_then(|r| r.add_rules(path_beneath_rules(&["/"], access_read)))
            .and_then(|r| r.add_rules(path_beneath_rules(writable, access_all)))
            .and_then(|r| r.restrict_self());

        match result {
            Ok(status) => match status.ruleset {
                RulesetStatus::FullyEnforced => info!(
                    ?status,
                    ?writable,
                    "Landlock sandbox fully enforced (writes limited to data directories)"
                ),
                RulesetStatus::PartiallyEnforced => info!(
                    ?status,
                    ?writable,
                    "Landlock sandbox partially enforced (writes limited to data directories)"
                ),
                RulesetStatus::NotEnforced => warn!(
                    ?status,
                    "Landlock ruleset not enforced; kernel does not support requested features"
                ),
            },
            Err(err) => {
                warn!(?err, "Landlock not enabled; continuing without sandbox");
            }
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub mod linux {
    use std::path::Path;

    /// No-op on non-Linux targets.
    pub fn init(_writable: &[&Path]) {
        tracing::debug!("Landlock is only available on Linux");
    }
}
