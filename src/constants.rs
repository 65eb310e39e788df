/// Namespace constants to ensure consistency across the codebase.
/// These constants define the namespace string written into every output
/// record for the corresponding standard.

// Namespaces (written to the `ns` column)
pub const EDI_NS: &str = "EDI";
pub const EANCOM_NS: &str = "Eancom";
pub const ISO20022_NS: &str = "Iso20022";
pub const MCC_NS: &str = "Mcc";
pub const SWIFT_NS: &str = "Swift";
pub const WEB_NS: &str = "Web";
pub const ONET_NS: &str = "Onet";
pub const JOBS_NS: &str = "Jobs";

// Source ids (used in CLI --sources selection and registry keys)
pub const X12_SOURCE: &str = "x12";
pub const EANCOM_SOURCE: &str = "eancom";
pub const ISO20022_SOURCE: &str = "iso20022";
pub const MCC_SOURCE: &str = "mcc";
pub const SWIFT_SOURCE: &str = "swift";
pub const WEB_SOURCE: &str = "web";
pub const ONET_SOURCE: &str = "onet";
pub const JOBS_SOURCE: &str = "jobs";

/// Get all supported source ids in their canonical run order.
/// The jobs superset reads onet's output, so it is registered last.
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![
        X12_SOURCE,
        EANCOM_SOURCE,
        ISO20022_SOURCE,
        MCC_SOURCE,
        SWIFT_SOURCE,
        WEB_SOURCE,
        ONET_SOURCE,
        JOBS_SOURCE,
    ]
}
