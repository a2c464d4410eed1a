/// Operational state (9.4.38)
pub const NM_OPSTATE_DISABLED: u8 = 1;
pub const NM_OPSTATE_ENABLED: u8 = 2;
pub const NM_OPSTATE_NULL: u8 = 0xff;

/// Administrative state (9.4.4)
pub const NM_STATE_LOCKED: u8 = 1;
pub const NM_STATE_UNLOCKED: u8 = 2;
pub const NM_STATE_SHUTDOWN: u8 = 3;

/// Availability status value used when the status attribute is present but empty
pub const NM_AVSTATE_OK: u8 = 0xff;

pub fn oper_state_name(state: u8) -> &'static str {
    match state {
        NM_OPSTATE_DISABLED => "Disabled",
        NM_OPSTATE_ENABLED => "Enabled",
        NM_OPSTATE_NULL => "NULL",
        _ => "RFU",
    }
}

/// Availability status (9.4.7)
pub fn avail_state_name(state: u8) -> &'static str {
    match state {
        0 => "In test",
        1 => "Failed",
        2 => "Power off",
        3 => "Off line",
        5 => "Dependency",
        6 => "Degraded",
        7 => "Not installed",
        NM_AVSTATE_OK => "OK",
        _ => "<not used>",
    }
}

pub fn adm_state_name(state: u8) -> &'static str {
    match state {
        NM_STATE_LOCKED => "Locked",
        NM_STATE_UNLOCKED => "Unlocked",
        NM_STATE_SHUTDOWN => "Shutdown",
        _ => "<not used>",
    }
}
