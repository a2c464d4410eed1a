oml_enum! {
    /// Clause 9.4 Attribute identifiers, plus the ip.access and BS-11 LMT vendor attributes
    /// referenced by name. The encoding of each tag lives in the attribute dictionary.
    /// Bits: 8
    pub enum NmAttr {
        AbisChannel = 0x01 => "Abis Channel",
        AddInfo = 0x02 => "Additional Info",
        AddText = 0x03 => "Additional Text",
        AdmState = 0x04 => "Administrative State",
        ArfcnList = 0x05 => "ARFCN List",
        AutonReport = 0x06 => "Autonomously Report",
        AvailStatus = 0x07 => "Availability Status",
        BcchArfcn = 0x08 => "BCCH ARFCN",
        Bsic = 0x09 => "BSIC",
        BtsAirTimer = 0x0a => "BTS Air Timer",
        CcchLIP = 0x0b => "CCCH Load Indication Period",
        CcchLT = 0x0c => "CCCH Load Threshold",
        ChanComb = 0x0d => "Channel Combination",
        ConnFailCrit = 0x0e => "Connection Failure Criterion",
        Dest = 0x0f => "Destination",
        /// Also carries the BS-11 software-load segment data
        EventType = 0x11 => "Event Type",
        FileId = 0x12 => "File Id",
        FileVersion = 0x13 => "File Version",
        GsmTime = 0x14 => "GSM Time",
        Hsn = 0x15 => "HSN",
        HwConfig = 0x16 => "HW Configuration",
        HwDesc = 0x17 => "HW Description",
        IntaveParam = 0x18 => "Intave Parameter",
        InterfBound = 0x19 => "Interference level Boundaries",
        ListReqAttr = 0x1a => "List of Required Attributes",
        Maio = 0x1b => "MAIO",
        ManufState = 0x1c => "Manufacturer Dependent State",
        ManufThresh = 0x1d => "Manufacturer Dependent Thresholds",
        ManufId = 0x1e => "Manufacturer Id",
        MaxTa = 0x1f => "Max Timing Advance",
        MdropLink = 0x20 => "Multi-drop BSC Link",
        MdropNext = 0x21 => "Multi-drop next BTS Link",
        NackCauses = 0x22 => "NACK Causes",
        Ny1 = 0x23 => "Ny1",
        OperState = 0x24 => "Operational State",
        OverlPeriod = 0x25 => "Overload Period",
        PhysConf = 0x26 => "Physical Config",
        PowerClass = 0x27 => "Power Class",
        PowerThresh = 0x28 => "Power Output Thresholds",
        ProbCause = 0x29 => "Probable Cause",
        RachBThresh = 0x2a => "RACH Busy Threshold",
        LdavgSlots = 0x2b => "RACH Load Averaging Slots",
        RadSubc = 0x2c => "Radio Sub Channel",
        RfMaxpowrR = 0x2d => "RF Max Power Reduction",
        SiteInputs = 0x2e => "Site Inputs",
        SiteOutputs = 0x2f => "Site Outputs",
        Source = 0x30 => "Source",
        SpecProb = 0x31 => "Specific Problems",
        StartTime = 0x32 => "Starting Time",
        T200 = 0x33 => "T200",
        Tei = 0x34 => "TEI",
        TestDur = 0x35 => "Test Duration",
        TestNo = 0x36 => "Test No",
        TestReport = 0x37 => "Test Report Info",
        VswrThresh = 0x38 => "VSWR Thresholds",
        WindowSize = 0x39 => "Window Size",
        Tsc = 0x40 => "TSC",
        SwConfig = 0x41 => "SW Configuration",
        SwDescr = 0x42 => "SW Description",
        Severity = 0x43 => "Perceived Severity",
        GetAri = 0x44 => "Get Attribute Response Info",
        HwConfChg = 0x45 => "HW Conf Change Notification",
        OutstAlarm = 0x46 => "Outstanding Alarm Sequence",
        FileData = 0x47 => "File Data",
        MeasRes = 0x48 => "Measurement Result",

        IpaccDstIp = 0x80 => "ip.access Destination IP",
        IpaccDstIpPort = 0x81 => "ip.access Destination Port",
        IpaccStreamId = 0x85 => "ip.access Stream Id",
        IpaccNvFlags = 0x86 => "ip.access NV Flags",
        IpaccFreqCtrl = 0x87 => "ip.access Frequency Control",
        IpaccSecOmlCfg = 0x89 => "ip.access Secondary OML Config",
        IpaccIpIfCfg = 0x8a => "ip.access IP Interface Config",
        IpaccIpGwCfg = 0x8b => "ip.access IP Gateway Config",
        IpaccLocation = 0x8e => "ip.access Location",
        IpaccUnitId = 0x91 => "ip.access Unit Id",
        IpaccUnitName = 0x93 => "ip.access Unit Name",
        IpaccSnmpCfg = 0x94 => "ip.access SNMP Config",
        IpaccPrimOmlCfgList = 0x95 => "ip.access Primary OML Config List",
        IpaccPrimOmlFbTout = 0x96 => "ip.access Primary OML Fallback Timeout",

        Bs11LmtLogonSession = 0xc6 => "BS11 LMT Logon Session",
        Bs11LmtLoginTime = 0xc7 => "BS11 LMT Login Time",
        Bs11LmtUserAccLev = 0xc8 => "BS11 LMT User Access Level",
        Bs11LmtUserName = 0xc9 => "BS11 LMT User Name",
    }
}
