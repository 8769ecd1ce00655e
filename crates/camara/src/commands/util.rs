//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use camara_api::Model;
use camara_api::types::{Device, DeviceIpv4Address};

use crate::cli::DeviceArgs;
use crate::error::CliError;

/// Build a `Device` from flags; `None` when no identifier was given.
pub fn device(args: DeviceArgs) -> Option<Device> {
    let DeviceArgs {
        phone,
        nai,
        ipv4,
        ipv4_port,
        ipv4_private,
        ipv6,
    } = args;

    let device = Device {
        phone_number: phone,
        network_access_identifier: nai,
        ipv4_address: ipv4.map(|public| DeviceIpv4Address {
            private_address: ipv4_private,
            public_port: ipv4_port.map(i32::from),
            ..DeviceIpv4Address::new(public)
        }),
        ipv6_address: ipv6,
    };

    device.is_identified().then_some(device)
}

/// Read a JSON document from a file, or stdin for `-`.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a JSON file into model `M`, reporting missing fields by wire name.
pub fn read_model<M: Model>(path: &Path) -> Result<M, CliError> {
    Ok(camara_api::shape::coerce(read_json_file(path)?)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use camara_api::qod::CreateSessionParams;

    use super::*;

    #[test]
    fn no_flags_means_no_device() {
        assert!(device(DeviceArgs::default()).is_none());
    }

    #[test]
    fn ipv4_flags_nest_under_the_address() {
        let device = device(DeviceArgs {
            ipv4: Some("84.125.93.10".into()),
            ipv4_port: Some(59765),
            ..DeviceArgs::default()
        })
        .unwrap();

        let ip = device.ipv4_address.unwrap();
        assert_eq!(ip.public_address, "84.125.93.10");
        assert_eq!(ip.public_port, Some(59765));
        assert_eq!(ip.private_address, None);
    }

    #[test]
    fn model_files_are_checked_for_required_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "qosProfile": "QOS_E", "duration": 60 }}"#).unwrap();

        let err = read_model::<CreateSessionParams>(file.path()).unwrap_err();
        assert!(err.to_string().contains("applicationServer"), "got {err}");
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = read_json_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }), "got {err:?}");
    }
}
