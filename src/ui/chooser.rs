//! Device chooser state

use crate::device::UsbDevice;

/// Selection over the devices a request returned
#[derive(Debug, Clone)]
pub struct DeviceChooser {
    devices: Vec<UsbDevice>,
    selected: usize,
}

impl DeviceChooser {
    /// Returns `None` when there is nothing to choose from
    pub fn new(devices: Vec<UsbDevice>) -> Option<Self> {
        (!devices.is_empty()).then_some(Self {
            devices,
            selected: 0,
        })
    }

    pub fn devices(&self) -> &[UsbDevice] {
        &self.devices
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &UsbDevice {
        &self.devices[self.selected]
    }

    /// Move the selection down, wrapping at the end
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.devices.len();
    }

    /// Move the selection up, wrapping at the start
    pub fn prev(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.devices.len() - 1);
    }

    /// Consume the chooser, yielding the selected device
    pub fn into_selected(mut self) -> UsbDevice {
        self.devices.swap_remove(self.selected)
    }
}
