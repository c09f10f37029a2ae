/// Downlink usage per the ACCESS-ASSIGN field interpretation
/// (Clause 21.4.7.2, table 21.77). Marker values 4..63 assign traffic to the
/// usage marker granted in a MAC-RESOURCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownlinkUsage {
    #[default]
    Unallocated,
    AssignedControl,
    CommonControl,
    Reserved,
    Traffic,
}

impl DownlinkUsage {
    pub fn from_usage_marker(marker: u8) -> Self {
        match marker {
            0 => DownlinkUsage::Unallocated,
            1 => DownlinkUsage::AssignedControl,
            2 => DownlinkUsage::CommonControl,
            3 => DownlinkUsage::Reserved,
            _ => DownlinkUsage::Traffic,
        }
    }
}
