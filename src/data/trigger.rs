// src/data/trigger.rs

//! The stated cause of a collection, e.g. the `Allocation Failure` in
//! `Pause Young (Allocation Failure)`.

use std::fmt;

/// Known collection causes plus [`GcTrigger::Unknown`] for anything else.
///
/// Text is matched exactly as HotSpot logs it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum GcTrigger {
    AllocationFailure,
    AllocationRate,
    AllocationStall,
    ClassUnloading,
    CmsFinalRemark,
    CmsInitialMark,
    ConcurrentModeFailure,
    DiagnosticCommand,
    Ergonomics,
    G1CompactionPause,
    G1EvacuationPause,
    G1HumongousAllocation,
    G1PreventiveCollection,
    GcLockerInitiatedGc,
    HeapDumpInitiatedGc,
    HeapInspectionInitiatedGc,
    HighUsage,
    JvmtiForceGc,
    LastDitchCollection,
    MetadataGcClearSoftReferences,
    MetadataGcThreshold,
    PromotionFailed,
    Proactive,
    SystemGc,
    Timer,
    ToSpaceExhausted,
    UpdateAllocationContextStats,
    Warmup,
    WhiteBoxInitiatedYoungGc,
    /// Raw text of a cause not in the list above.
    Unknown(String),
}

/// `(text, trigger)` pairs for every known trigger.
const TRIGGER_TEXTS: &[(&str, GcTrigger)] = &[
    ("Allocation Failure", GcTrigger::AllocationFailure),
    ("Allocation Rate", GcTrigger::AllocationRate),
    ("Allocation Stall", GcTrigger::AllocationStall),
    ("Class Unloading", GcTrigger::ClassUnloading),
    ("CMS Final Remark", GcTrigger::CmsFinalRemark),
    ("CMS Initial Mark", GcTrigger::CmsInitialMark),
    ("concurrent mode failure", GcTrigger::ConcurrentModeFailure),
    ("Diagnostic Command", GcTrigger::DiagnosticCommand),
    ("Ergonomics", GcTrigger::Ergonomics),
    ("G1 Compaction Pause", GcTrigger::G1CompactionPause),
    ("G1 Evacuation Pause", GcTrigger::G1EvacuationPause),
    ("G1 Humongous Allocation", GcTrigger::G1HumongousAllocation),
    ("G1 Preventive Collection", GcTrigger::G1PreventiveCollection),
    ("GCLocker Initiated GC", GcTrigger::GcLockerInitiatedGc),
    ("Heap Dump Initiated GC", GcTrigger::HeapDumpInitiatedGc),
    ("Heap Inspection Initiated GC", GcTrigger::HeapInspectionInitiatedGc),
    ("High Usage", GcTrigger::HighUsage),
    ("JvmtiEnv ForceGarbageCollection", GcTrigger::JvmtiForceGc),
    ("Last ditch collection", GcTrigger::LastDitchCollection),
    ("Metadata GC Clear Soft References", GcTrigger::MetadataGcClearSoftReferences),
    ("Metadata GC Threshold", GcTrigger::MetadataGcThreshold),
    ("promotion failed", GcTrigger::PromotionFailed),
    ("Proactive", GcTrigger::Proactive),
    ("System.gc()", GcTrigger::SystemGc),
    ("System.gc", GcTrigger::SystemGc),
    ("Timer", GcTrigger::Timer),
    ("to-space exhausted", GcTrigger::ToSpaceExhausted),
    ("Update Allocation Context Stats", GcTrigger::UpdateAllocationContextStats),
    ("Warmup", GcTrigger::Warmup),
    ("WhiteBox Initiated Young GC", GcTrigger::WhiteBoxInitiatedYoungGc),
];

impl GcTrigger {
    /// Map logged trigger text to a `GcTrigger`. Never fails; unrecognized
    /// text becomes [`GcTrigger::Unknown`].
    pub fn from_text(text: &str) -> GcTrigger {
        let text: &str = text.trim();
        for (text_, trigger) in TRIGGER_TEXTS.iter() {
            if *text_ == text {
                return trigger.clone();
            }
        }

        GcTrigger::Unknown(text.to_string())
    }

    /// The logged text of this trigger.
    pub fn as_text(&self) -> &str {
        if let GcTrigger::Unknown(text) = self {
            return text.as_str();
        }
        match TRIGGER_TEXTS.iter().find(|(_, trigger)| trigger == self) {
            Some((text, _)) => text,
            None => "",
        }
    }

    /// Collection was requested by the application or a tool rather than
    /// by the collector.
    pub const fn is_explicit_gc(&self) -> bool {
        matches!(
            self,
            GcTrigger::SystemGc
                | GcTrigger::DiagnosticCommand
                | GcTrigger::HeapDumpInitiatedGc
                | GcTrigger::HeapInspectionInitiatedGc
                | GcTrigger::JvmtiForceGc
        )
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, GcTrigger::Unknown(_))
    }
}

impl fmt::Display for GcTrigger {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}
