use thiserror::Error;

/// Join failures inside the aggregation. Every derived table is grouped
/// from the same qualified rows, so any of these means the row filter let
/// something inconsistent through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("no pass total for {pitcher}, time through order {times_through_order}")]
    MissingTotal {
        pitcher: String,
        times_through_order: u8,
    },

    #[error("no season baseline for {pitcher} {pitch_type}")]
    MissingBaseline { pitcher: String, pitch_type: String },

    #[error("no usage row for {pitcher}, time through order {times_through_order}, {pitch_type}")]
    MissingUsage {
        pitcher: String,
        times_through_order: u8,
        pitch_type: String,
    },

    #[error("usage row for {pitcher}, time through order {times_through_order}, {pitch_type} has no averages")]
    MissingCharacteristics {
        pitcher: String,
        times_through_order: u8,
        pitch_type: String,
    },
}
