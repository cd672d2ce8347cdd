//! CIN census table identifiers and their fixed column sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Column names shared by the CIN tables.
///
/// Names match the census field names exactly; several appear in more than
/// one table (e.g. `LAchildID`).
pub mod columns {
    // Header
    pub const COLLECTION: &str = "Collection";
    pub const YEAR: &str = "Year";
    pub const REFERENCE_DATE: &str = "ReferenceDate";
    pub const SOURCE_LEVEL: &str = "SourceLevel";
    pub const LEA: &str = "LEA";
    pub const SOFTWARE_CODE: &str = "SoftwareCode";
    pub const RELEASE: &str = "Release";
    pub const SERIAL_NO: &str = "SerialNo";
    pub const DATE_TIME: &str = "DateTime";

    // Identifiers shared across child-level tables
    pub const LA_CHILD_ID: &str = "LAchildID";
    pub const CIN_DETAILS_ID: &str = "CINdetailsID";
    pub const CPP_ID: &str = "CPPID";

    // ChildIdentifiers
    pub const UPN: &str = "UPN";
    pub const FORMER_UPN: &str = "FormerUPN";
    pub const UPN_UNKNOWN: &str = "UPNunknown";
    pub const PERSON_BIRTH_DATE: &str = "PersonBirthDate";
    pub const EXPECTED_PERSON_BIRTH_DATE: &str = "ExpectedPersonBirthDate";
    pub const GENDER_CURRENT: &str = "GenderCurrent";
    pub const PERSON_DEATH_DATE: &str = "PersonDeathDate";

    // ChildCharacteristics / Disabilities
    pub const ETHNICITY: &str = "Ethnicity";
    pub const DISABILITY: &str = "Disability";

    // CINdetails
    pub const CIN_REFERRAL_DATE: &str = "CINreferralDate";
    pub const REFERRAL_SOURCE: &str = "ReferralSource";
    pub const PRIMARY_NEED_CODE: &str = "PrimaryNeedCode";
    pub const CIN_CLOSURE_DATE: &str = "CINclosureDate";
    pub const REASON_FOR_CLOSURE: &str = "ReasonForClosure";
    pub const DATE_OF_INITIAL_CPC: &str = "DateOfInitialCPC";
    pub const REFERRAL_NFA: &str = "ReferralNFA";

    // Assessments
    pub const ASSESSMENT_ACTUAL_START_DATE: &str = "AssessmentActualStartDate";
    pub const ASSESSMENT_INTERNAL_REVIEW_DATE: &str = "AssessmentInternalReviewDate";
    pub const ASSESSMENT_AUTHORISATION_DATE: &str = "AssessmentAuthorisationDate";
    pub const ASSESSMENT_FACTORS: &str = "AssessmentFactors";

    // CINplanDates
    pub const CIN_PLAN_START_DATE: &str = "CINPlanStartDate";
    pub const CIN_PLAN_END_DATE: &str = "CINPlanEndDate";

    // Section47
    pub const S47_ACTUAL_START_DATE: &str = "S47ActualStartDate";
    pub const INITIAL_CPC_TARGET: &str = "InitialCPCtarget";
    pub const ICPC_NOT_REQUIRED: &str = "ICPCnotRequired";

    // ChildProtectionPlans
    pub const CPP_START_DATE: &str = "CPPstartDate";
    pub const CPP_END_DATE: &str = "CPPendDate";
    pub const INITIAL_CATEGORY_OF_ABUSE: &str = "InitialCategoryOfAbuse";
    pub const LATEST_CATEGORY_OF_ABUSE: &str = "LatestCategoryOfAbuse";
    pub const NUMBER_OF_PREVIOUS_CPP: &str = "NumberOfPreviousCPP";

    // Reviews
    pub const CPP_REVIEW_DATE: &str = "CPPreviewDate";
}

use columns as c;

/// One normalized CIN table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CinTable {
    Header,
    ChildIdentifiers,
    ChildCharacteristics,
    Disabilities,
    #[serde(rename = "CINdetails")]
    CinDetails,
    Assessments,
    #[serde(rename = "CINplanDates")]
    CinPlanDates,
    Section47,
    ChildProtectionPlans,
    Reviews,
}

impl CinTable {
    /// All tables in census document order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Header,
            Self::ChildIdentifiers,
            Self::ChildCharacteristics,
            Self::Disabilities,
            Self::CinDetails,
            Self::Assessments,
            Self::CinPlanDates,
            Self::Section47,
            Self::ChildProtectionPlans,
            Self::Reviews,
        ]
    }

    /// Canonical table name as used in census files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::ChildIdentifiers => "ChildIdentifiers",
            Self::ChildCharacteristics => "ChildCharacteristics",
            Self::Disabilities => "Disabilities",
            Self::CinDetails => "CINdetails",
            Self::Assessments => "Assessments",
            Self::CinPlanDates => "CINplanDates",
            Self::Section47 => "Section47",
            Self::ChildProtectionPlans => "ChildProtectionPlans",
            Self::Reviews => "Reviews",
        }
    }

    /// The fixed column set of this table, in census order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Header => &[
                c::COLLECTION,
                c::YEAR,
                c::REFERENCE_DATE,
                c::SOURCE_LEVEL,
                c::LEA,
                c::SOFTWARE_CODE,
                c::RELEASE,
                c::SERIAL_NO,
                c::DATE_TIME,
            ],
            Self::ChildIdentifiers => &[
                c::LA_CHILD_ID,
                c::UPN,
                c::FORMER_UPN,
                c::UPN_UNKNOWN,
                c::PERSON_BIRTH_DATE,
                c::EXPECTED_PERSON_BIRTH_DATE,
                c::GENDER_CURRENT,
                c::PERSON_DEATH_DATE,
            ],
            Self::ChildCharacteristics => &[c::LA_CHILD_ID, c::ETHNICITY],
            Self::Disabilities => &[c::LA_CHILD_ID, c::DISABILITY],
            Self::CinDetails => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::CIN_REFERRAL_DATE,
                c::REFERRAL_SOURCE,
                c::PRIMARY_NEED_CODE,
                c::CIN_CLOSURE_DATE,
                c::REASON_FOR_CLOSURE,
                c::DATE_OF_INITIAL_CPC,
                c::REFERRAL_NFA,
            ],
            Self::Assessments => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::ASSESSMENT_ACTUAL_START_DATE,
                c::ASSESSMENT_INTERNAL_REVIEW_DATE,
                c::ASSESSMENT_AUTHORISATION_DATE,
                c::ASSESSMENT_FACTORS,
            ],
            Self::CinPlanDates => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::CIN_PLAN_START_DATE,
                c::CIN_PLAN_END_DATE,
            ],
            Self::Section47 => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::S47_ACTUAL_START_DATE,
                c::INITIAL_CPC_TARGET,
                c::DATE_OF_INITIAL_CPC,
                c::ICPC_NOT_REQUIRED,
            ],
            Self::ChildProtectionPlans => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::CPP_ID,
                c::CPP_START_DATE,
                c::CPP_END_DATE,
                c::INITIAL_CATEGORY_OF_ABUSE,
                c::LATEST_CATEGORY_OF_ABUSE,
                c::NUMBER_OF_PREVIOUS_CPP,
            ],
            Self::Reviews => &[
                c::LA_CHILD_ID,
                c::CIN_DETAILS_ID,
                c::CPP_ID,
                c::CPP_REVIEW_DATE,
            ],
        }
    }

    /// Whether `column` belongs to this table's column set.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl fmt::Display for CinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CinTable {
    type Err = ModelError;

    /// Parses a table name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|table| table.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownTable(trimmed.to_string()))
    }
}
