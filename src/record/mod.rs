mod record;

pub use record::AutomatonRecord;
pub use record::NfaRecord;
pub use record::TransitionRecord;
pub use record::EPSILON;
