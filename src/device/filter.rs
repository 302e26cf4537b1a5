//! USB interface class filters

/// Class triple reported by a USB interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceClass {
    pub class_code: u8,
    pub subclass_code: u8,
    pub protocol_code: u8,
}

/// Matches USB interfaces by class, subclass and protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceFilter {
    pub class_code: u8,
    pub subclass_code: u8,
    pub protocol_code: u8,
}

impl DeviceFilter {
    /// HID class, boot interface subclass, keyboard protocol
    pub const HID_KEYBOARD: Self = Self {
        class_code: 3,
        subclass_code: 1,
        protocol_code: 1,
    };

    pub fn matches(&self, interface: &InterfaceClass) -> bool {
        self.class_code == interface.class_code
            && self.subclass_code == interface.subclass_code
            && self.protocol_code == interface.protocol_code
    }

    /// HID usage page and usage of the top-level collection a boot
    /// interface with this filter's triple exposes. `None` for anything
    /// that is not a HID boot keyboard or mouse.
    pub fn hid_usage(&self) -> Option<(u16, u16)> {
        match (self.class_code, self.subclass_code, self.protocol_code) {
            (3, 1, 1) => Some((0x01, 0x06)),
            (3, 1, 2) => Some((0x01, 0x02)),
            _ => None,
        }
    }
}
