//! Raw Input - What the prediction form collects
//!
//! Three numeric fields and four categorical selections.
//! Categorical labels match the training data exactly; they become part of
//! the one-hot column names (`"{Field}_{Label}"`).

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// A categorical form field that is one-hot encoded with drop-first.
pub trait Categorical: Copy + 'static {
    /// Field name used as the one-hot column prefix
    const FIELD: &'static str;

    /// Every selectable value, baseline first
    fn variants() -> &'static [Self];

    /// Training-data label of this value
    fn label(&self) -> &'static str;

    /// Baseline (reference) category: encoded as all zeros
    fn is_baseline(&self) -> bool;

    /// Candidate one-hot column, `None` for the baseline category
    fn one_hot_column(&self) -> Option<String> {
        if self.is_baseline() {
            None
        } else {
            Some(format!("{}_{}", Self::FIELD, self.label()))
        }
    }
}

/// Contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Contract {
    #[default]
    #[serde(rename = "Month-to-month", alias = "MonthToMonth")]
    MonthToMonth,
    #[serde(rename = "One year", alias = "OneYear")]
    OneYear,
    #[serde(rename = "Two year", alias = "TwoYear")]
    TwoYear,
}

impl Categorical for Contract {
    const FIELD: &'static str = "Contract";

    fn variants() -> &'static [Self] {
        &[Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear]
    }

    fn label(&self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }

    fn is_baseline(&self) -> bool {
        matches!(self, Contract::MonthToMonth)
    }
}

/// Internet service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InternetService {
    #[default]
    #[serde(rename = "DSL", alias = "Dsl")]
    Dsl,
    #[serde(rename = "Fiber optic", alias = "FiberOptic")]
    FiberOptic,
    #[serde(rename = "No", alias = "None")]
    None,
}

impl Categorical for InternetService {
    const FIELD: &'static str = "InternetService";

    fn variants() -> &'static [Self] {
        &[InternetService::Dsl, InternetService::FiberOptic, InternetService::None]
    }

    fn label(&self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::None => "No",
        }
    }

    fn is_baseline(&self) -> bool {
        matches!(self, InternetService::Dsl)
    }
}

/// Payment method
///
/// Has no explicit baseline: every method produces a candidate column and
/// the one the schema dropped during training simply does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Electronic check", alias = "ElectronicCheck")]
    ElectronicCheck,
    #[serde(rename = "Mailed check", alias = "MailedCheck")]
    MailedCheck,
    #[serde(rename = "Bank transfer (automatic)", alias = "BankTransferAuto")]
    BankTransferAuto,
    #[serde(rename = "Credit card (automatic)", alias = "CreditCardAuto")]
    CreditCardAuto,
}

impl Categorical for PaymentMethod {
    const FIELD: &'static str = "PaymentMethod";

    fn variants() -> &'static [Self] {
        &[
            PaymentMethod::ElectronicCheck,
            PaymentMethod::MailedCheck,
            PaymentMethod::BankTransferAuto,
            PaymentMethod::CreditCardAuto,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
            PaymentMethod::BankTransferAuto => "Bank transfer (automatic)",
            PaymentMethod::CreditCardAuto => "Credit card (automatic)",
        }
    }

    fn is_baseline(&self) -> bool {
        false
    }
}

/// Paperless billing flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperlessBilling {
    #[default]
    Yes,
    No,
}

impl Categorical for PaperlessBilling {
    const FIELD: &'static str = "PaperlessBilling";

    fn variants() -> &'static [Self] {
        &[PaperlessBilling::No, PaperlessBilling::Yes]
    }

    fn label(&self) -> &'static str {
        match self {
            PaperlessBilling::Yes => "Yes",
            PaperlessBilling::No => "No",
        }
    }

    fn is_baseline(&self) -> bool {
        matches!(self, PaperlessBilling::No)
    }
}

macro_rules! impl_display_label {
    ($($ty:ty),*) => {$(
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    )*};
}

impl_display_label!(Contract, InternetService, PaymentMethod, PaperlessBilling);

// ============================================================================
// RAW INPUT
// ============================================================================

/// One customer as entered on the form. Created fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    /// Months with the company
    #[validate(range(min = 0, max = 72))]
    pub tenure: i64,

    /// Monthly charges ($)
    #[validate(range(min = 20, max = 150))]
    pub monthly_charges: i64,

    /// Total charges to date ($)
    #[validate(range(min = 0, max = 10000))]
    pub total_charges: i64,

    pub contract: Contract,
    pub internet_service: InternetService,
    pub payment_method: PaymentMethod,
    pub paperless_billing: PaperlessBilling,
}

impl RawInput {
    /// Numeric features in scaler order
    pub fn numeric_features(&self) -> [f32; 3] {
        [
            self.tenure as f32,
            self.monthly_charges as f32,
            self.total_charges as f32,
        ]
    }
}

impl Default for RawInput {
    /// Initial form state
    fn default() -> Self {
        Self {
            tenure: 12,
            monthly_charges: 70,
            total_charges: 1500,
            contract: Contract::default(),
            internet_service: InternetService::default(),
            payment_method: PaymentMethod::default(),
            paperless_billing: PaperlessBilling::default(),
        }
    }
}
