//! Configured client model.
//!
//! [`ClientConfig`] is the raw shape exchanged with the configuration loader
//! and the persistence layer; [`Client`] is the validated value the directory
//! stores, with identifiers classified once into [`ClientId`]s.

use lanid_common::network::identifier::ClientId;

use crate::error::ClientError;
use crate::upstream::UpstreamValidator;

/// Ordered WHOIS key/value metadata attached to an identity.
pub type WhoisInfo = Vec<(String, String)>;

/// A client definition as loaded from (and persisted back to) configuration.
///
/// `ids` holds raw identifier strings; they are classified during
/// [`crate::directory::ClientDirectory::add`]. The `use_global_*` flags carry
/// the persisted polarity: `true` means the global defaults apply and the
/// per-client values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub name: String,
    pub ids: Vec<String>,
    pub use_global_settings: bool,
    pub filtering_enabled: bool,
    pub parental_enabled: bool,
    pub safe_search_enabled: bool,
    pub safe_browsing_enabled: bool,
    pub use_global_blocked_services: bool,
    pub blocked_services: Vec<String>,
    /// Upstream resolvers used for this client's queries; empty means the
    /// global upstreams.
    pub upstreams: Vec<String>,
}

/// A validated, explicitly configured client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub name: String,
    pub ids: Vec<ClientId>,
    pub use_own_settings: bool,
    pub filtering_enabled: bool,
    pub parental_enabled: bool,
    pub safe_search_enabled: bool,
    pub safe_browsing_enabled: bool,
    pub use_own_blocked_services: bool,
    pub blocked_services: Vec<String>,
    pub upstreams: Vec<String>,
    pub whois_info: WhoisInfo,
}

impl Client {
    /// Validates a raw definition and classifies its identifiers.
    ///
    /// Fails on an empty name, an empty or unparsable identifier list, or a
    /// non-empty upstream list the validator rejects. No partial value is
    /// ever produced.
    pub(crate) fn from_config(
        cfg: ClientConfig,
        validator: &dyn UpstreamValidator,
    ) -> Result<Self, ClientError> {
        if cfg.name.is_empty() {
            return Err(ClientError::EmptyName);
        }
        if cfg.ids.is_empty() {
            return Err(ClientError::EmptyIds(cfg.name));
        }

        let ids = cfg
            .ids
            .iter()
            .map(|raw| raw.parse::<ClientId>())
            .collect::<Result<Vec<_>, _>>()?;

        if !cfg.upstreams.is_empty() {
            validator
                .validate(&cfg.upstreams)
                .map_err(ClientError::InvalidUpstreams)?;
        }

        Ok(Self {
            name: cfg.name,
            ids,
            use_own_settings: !cfg.use_global_settings,
            filtering_enabled: cfg.filtering_enabled,
            parental_enabled: cfg.parental_enabled,
            safe_search_enabled: cfg.safe_search_enabled,
            safe_browsing_enabled: cfg.safe_browsing_enabled,
            use_own_blocked_services: !cfg.use_global_blocked_services,
            blocked_services: cfg.blocked_services,
            upstreams: cfg.upstreams,
            whois_info: Vec::new(),
        })
    }

    /// The persistence shape of this client, identifiers in canonical
    /// textual form and list order preserved.
    pub(crate) fn to_config(&self) -> ClientConfig {
        ClientConfig {
            name: self.name.clone(),
            ids: self.ids.iter().map(ToString::to_string).collect(),
            use_global_settings: !self.use_own_settings,
            filtering_enabled: self.filtering_enabled,
            parental_enabled: self.parental_enabled,
            safe_search_enabled: self.safe_search_enabled,
            safe_browsing_enabled: self.safe_browsing_enabled,
            use_global_blocked_services: !self.use_own_blocked_services,
            blocked_services: self.blocked_services.clone(),
            upstreams: self.upstreams.clone(),
        }
    }
}
