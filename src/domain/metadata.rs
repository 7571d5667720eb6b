//! Static descriptive metadata for each classification label.

use crate::domain::labels::TumorClass;

/// Descriptive metadata shown alongside a classification.
///
/// Process-wide immutable data, resolved by an exhaustive match so that a new
/// [`TumorClass`] variant cannot be added without a metadata entry.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryMetadata {
    /// Name shown to the user.
    pub display_name: &'static str,
    /// Short description of the category.
    pub description: &'static str,
    /// Common symptoms associated with the category.
    pub symptoms: &'static [&'static str],
    /// Typical treatment summary.
    pub treatment: &'static str,
}

static NO_TUMOR: CategoryMetadata = CategoryMetadata {
    display_name: "No Tumor Detected",
    description: "No tumor-like mass was identified in the scan. Routine follow-up imaging \
                  remains advisable if symptoms persist.",
    symptoms: &[],
    treatment: "No treatment indicated based on this scan.",
};

static GLIOMA: CategoryMetadata = CategoryMetadata {
    display_name: "Glioma",
    description: "A tumor arising from the glial cells that surround and support neurons. \
                  Gliomas range from slow-growing to highly aggressive.",
    symptoms: &[
        "Headaches, often worse in the morning",
        "Seizures",
        "Progressive weakness or numbness",
        "Cognitive or personality changes",
    ],
    treatment: "Surgical resection where feasible, typically followed by radiotherapy \
                and/or chemotherapy depending on grade.",
};

static MENINGIOMA: CategoryMetadata = CategoryMetadata {
    display_name: "Meningioma",
    description: "A usually benign tumor of the meninges, the membranes covering the brain \
                  and spinal cord. Often slow-growing.",
    symptoms: &[
        "Headaches",
        "Vision changes",
        "Hearing loss or ringing in the ears",
        "Memory difficulties",
    ],
    treatment: "Observation with serial imaging for small asymptomatic tumors; surgery \
                or stereotactic radiosurgery for symptomatic or growing tumors.",
};

static PITUITARY: CategoryMetadata = CategoryMetadata {
    display_name: "Pituitary Tumor",
    description: "A growth in the pituitary gland at the base of the brain. Most are benign \
                  adenomas but may disturb hormone balance.",
    symptoms: &[
        "Vision problems, particularly peripheral vision loss",
        "Unexplained fatigue",
        "Hormonal imbalance",
        "Headaches behind the eyes",
    ],
    treatment: "Medication to control hormone production, transsphenoidal surgery, or \
                radiotherapy depending on tumor type and size.",
};

/// Looks up the metadata for an enumerated class. Total over [`TumorClass`].
pub fn metadata_for(class: TumorClass) -> &'static CategoryMetadata {
    match class {
        TumorClass::NoTumor => &NO_TUMOR,
        TumorClass::Glioma => &GLIOMA,
        TumorClass::Meningioma => &MENINGIOMA,
        TumorClass::Pituitary => &PITUITARY,
    }
}

/// Looks up metadata by raw label string.
///
/// Returns `None` for labels outside the enumerated set.
pub fn metadata_for_label(label: &str) -> Option<&'static CategoryMetadata> {
    label.parse::<TumorClass>().ok().map(metadata_for)
}
