use nsquery_domain::{AddressFamily, ResolverConfig};
use std::net::SocketAddr;
use tracing::debug;

/// Orders the configured nameservers into the list of destinations to try.
pub struct NameserverSelectionService;

impl NameserverSelectionService {
    /// Destinations in configuration order, minus those whose family the
    /// resolver's IP preference rules out. Skipped entries cost no attempt.
    pub fn candidates(config: &ResolverConfig) -> Vec<SocketAddr> {
        config
            .nameservers
            .iter()
            .filter(|nameserver| {
                let family = AddressFamily::of(nameserver);
                let admitted = config.ip_preference.admits(family);
                if !admitted {
                    debug!(
                        nameserver = %nameserver,
                        family = %family,
                        preference = config.ip_preference.as_str(),
                        "Skipping nameserver, family mismatch"
                    );
                }
                admitted
            })
            .map(|nameserver| config.socket_addr(*nameserver))
            .collect()
    }
}
