use anyhow::Result;
use async_trait::async_trait;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{SWIFT_NS, SWIFT_SOURCE};

/// SWIFT MT message types. The reference list is small and stable enough
/// to live as a literal table; there is no source file dependency.
const MESSAGE_TYPES: &[(&str, &str, &str)] = &[
    (
        "MT103",
        "Single Customer Credit Transfer",
        "Instructs a funds transfer on behalf of an ordering customer to a beneficiary customer.",
    ),
    (
        "MT103+",
        "Single Customer Credit Transfer STP",
        "Straight-through-processing variant of MT103 with restricted field usage.",
    ),
    (
        "MT192",
        "Request for Cancellation",
        "Requests cancellation of a previously sent customer payment message.",
    ),
    (
        "MT199",
        "Free Format Message",
        "Free format message relating to a customer payment.",
    ),
    (
        "MT200",
        "Financial Institution Transfer for its Own Account",
        "Requests the movement of the sender's funds to its account at another institution.",
    ),
    (
        "MT202",
        "General Financial Institution Transfer",
        "Requests the movement of funds between financial institutions.",
    ),
    (
        "MT202COV",
        "Cover Payment",
        "Financial institution transfer covering an underlying customer credit transfer.",
    ),
    (
        "MT210",
        "Notice to Receive",
        "Notifies the receiver that it will receive funds for the sender's account.",
    ),
    (
        "MT300",
        "Foreign Exchange Confirmation",
        "Confirms the details of a foreign exchange contract between two parties.",
    ),
    (
        "MT320",
        "Fixed Loan/Deposit Confirmation",
        "Confirms the terms of a fixed term loan or deposit contract.",
    ),
    (
        "MT540",
        "Receive Free",
        "Instructs a receipt of securities free of payment.",
    ),
    (
        "MT541",
        "Receive Against Payment",
        "Instructs a receipt of securities against payment.",
    ),
    (
        "MT700",
        "Issue of a Documentary Credit",
        "Indicates the terms and conditions of a documentary credit.",
    ),
    (
        "MT760",
        "Guarantee / Standby Letter of Credit",
        "Issues or requests the issue of a guarantee or standby letter of credit.",
    ),
    (
        "MT900",
        "Confirmation of Debit",
        "Advises an account owner of a debit to its account.",
    ),
    (
        "MT910",
        "Confirmation of Credit",
        "Advises an account owner of a credit to its account.",
    ),
    (
        "MT940",
        "Customer Statement Message",
        "Transmits detailed information about all entries booked to a customer account.",
    ),
    (
        "MT950",
        "Statement Message",
        "Transmits balance and transaction information for a financial institution account.",
    ),
];

/// Transform emitting the SWIFT MT message-type reference table.
pub struct SwiftTransform;

impl SwiftTransform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for SwiftTransform {
    fn source_id(&self) -> &'static str {
        SWIFT_SOURCE
    }

    fn name(&self) -> &'static str {
        "SWIFT MT Messages"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let records: Vec<_> = MESSAGE_TYPES
            .iter()
            .map(|(code, title, description)| {
                TransformUtils::standard_record(
                    SWIFT_NS,
                    "MessageType",
                    title,
                    TransformUtils::coded_name(code, title),
                    description,
                    code,
                )
            })
            .collect();

        TransformUtils::write_entities(ctx, SWIFT_NS, "MessageType", &records)
    }
}

impl Default for SwiftTransform {
    fn default() -> Self {
        Self::new()
    }
}
