// SPDX-License-Identifier: Apache-2.0

use crate::{DhcpError, ErrorKind};

// https://www.iana.org/assignments/arp-parameters/arp-parameters.xhtml
pub(crate) const ARP_HW_TYPE_ETHERNET: u16 = 1;

/// Probe the IANA ARP hardware type of a network interface.
///
/// Only implemented on Linux, where the kernel exposes the type through
/// sysfs; every other platform fails with
/// [ErrorKind::HardwareTypeNotImplemented]. Callers deriving a server
/// DUID treat both that and [ErrorKind::ParseHardwareType] as non-fatal
/// and fall back to Ethernet/10Mb (1).
#[cfg(target_os = "linux")]
pub fn hardware_type(iface_name: &str) -> Result<u16, DhcpError> {
    let path = format!("/sys/class/net/{iface_name}/type");
    let content = std::fs::read_to_string(path.as_str()).map_err(|e| {
        DhcpError::new(
            ErrorKind::ParseHardwareType,
            format!("Failed to read {path}: {e}"),
        )
    })?;
    content.trim().parse::<u16>().map_err(|e| {
        DhcpError::new(
            ErrorKind::ParseHardwareType,
            format!(
                "Failed to parse hardware type {} of {iface_name}: {e}",
                content.trim()
            ),
        )
    })
}

#[cfg(not(target_os = "linux"))]
pub fn hardware_type(_iface_name: &str) -> Result<u16, DhcpError> {
    Err(DhcpError::new(
        ErrorKind::HardwareTypeNotImplemented,
        "Hardware type detection is not implemented on this platform"
            .to_string(),
    ))
}
