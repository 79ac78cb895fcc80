use portal_rpc::{ClientConfig, PortalToml};

/// Load the config file, letting `endpoint` take precedence. A missing file
/// is fine as long as an endpoint was given some other way.
pub fn load(path: &str, endpoint: Option<&String>) -> PortalToml {
    let cf = match std::path::Path::new(path).exists() {
        true => match PortalToml::load(path) {
            Ok(cf) => Some(cf),
            Err(e) => crate::fatal!("failed to load {}: {}", path, e),
        },
        false => None,
    };
    match (cf, endpoint) {
        (Some(mut cf), Some(ep)) => {
            cf.rpc.endpoint = ep.clone();
            cf
        }
        (Some(cf), None) => cf,
        (None, Some(ep)) => PortalToml {
            rpc: ClientConfig::new(ep.clone()),
        },
        (None, None) => crate::fatal!("no {} and no --endpoint given", path),
    }
}
