//! Device listing use case (`--list`, `--slist`, `--alist`, `--clist`)

use crate::domain::device::{DeviceInventory, DeviceKind};

use super::ports::{DeviceProbe, ProbeError};

/// Devices found, plus the kinds that could not be probed
#[derive(Debug, Default)]
pub struct ListReport {
    pub kinds: Vec<DeviceKind>,
    pub inventory: DeviceInventory,
    pub failures: Vec<(DeviceKind, ProbeError)>,
}

impl ListReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Probe each requested kind. A failing kind does not stop the others.
pub async fn list_devices<P: DeviceProbe>(probe: &P, kinds: &[DeviceKind]) -> ListReport {
    let mut report = ListReport {
        kinds: kinds.to_vec(),
        ..Default::default()
    };

    for kind in kinds {
        match probe.devices(*kind).await {
            Ok(devices) => report.inventory.set(*kind, devices),
            Err(e) => {
                tracing::debug!(%kind, error = %e, "Device probe failed");
                report.failures.push((*kind, e));
            }
        }
    }

    report
}
