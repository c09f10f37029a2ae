use core::fmt;

use tetra_core::{BitBuffer, PduParseErr};

/// Clause 18.4.2.2 D-MLE-SYSINFO, the 42-bit TM-SDU of the SYSINFO PDU.
#[derive(Debug, Clone)]
pub struct DMleSysinfo {
    // 14
    pub location_area: u16,
    // 16
    pub subscriber_class: u16,
    // 12, BS service details bitmap
    pub bs_service_details: u16,
}

impl DMleSysinfo {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let location_area = buf.read_field(14, "location_area")? as u16;
        let subscriber_class = buf.read_field(16, "subscriber_class")? as u16;
        let bs_service_details = buf.read_field(12, "bs_service_details")? as u16;

        Ok(DMleSysinfo {
            location_area,
            subscriber_class,
            bs_service_details,
        })
    }

    pub fn registration_mandatory(&self) -> bool {
        self.bs_service_details & 0x800 != 0
    }
    pub fn deregistration_mandatory(&self) -> bool {
        self.bs_service_details & 0x400 != 0
    }
    pub fn priority_cell(&self) -> bool {
        self.bs_service_details & 0x200 != 0
    }
    pub fn cell_never_minimum_mode(&self) -> bool {
        self.bs_service_details & 0x100 != 0
    }
    pub fn migration_supported(&self) -> bool {
        self.bs_service_details & 0x080 != 0
    }
    pub fn system_wide_services(&self) -> bool {
        self.bs_service_details & 0x040 != 0
    }
    pub fn voice_service(&self) -> bool {
        self.bs_service_details & 0x020 != 0
    }
    pub fn circuit_mode_data_service(&self) -> bool {
        self.bs_service_details & 0x010 != 0
    }
    pub fn sndcp_service(&self) -> bool {
        self.bs_service_details & 0x004 != 0
    }
    pub fn air_interface_encryption(&self) -> bool {
        self.bs_service_details & 0x002 != 0
    }
    pub fn advanced_link_supported(&self) -> bool {
        self.bs_service_details & 0x001 != 0
    }
}

impl fmt::Display for DMleSysinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DMleSysinfo {{ location_area: {} subscriber_class: {:#x} bs_service_details: {:#x} }}",
            self.location_area, self.subscriber_class, self.bs_service_details
        )
    }
}
