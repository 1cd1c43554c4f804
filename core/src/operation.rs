//! The closed set of accounts API operations.
//!
//! # Design
//! Each variant carries exactly the data its endpoint needs. Method, path and
//! parameters are derived by exhaustive matches, so adding a variant without
//! deciding all three does not compile. Operations also round-trip through
//! serde (tagged by `"operation"`), which lets hosts and test vectors describe
//! calls as data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding::{self, Parameters};
use crate::error::RouterError;
use crate::http::HttpMethod;
use crate::types::{CreatePaymentCardRequest, PaymentCardsFilter, UpdatePaymentCardLimitRequest};

const SWIFT: &[&str] = &["transfer", "rest", "v1", "swift"];
const ACCOUNTS: &[&str] = &["account", "rest", "v1", "accounts"];
const CARDS: &[&str] = &["issued-payment-card", "v1", "cards"];
const CARD_ACCOUNTS: &[&str] = &["issued-payment-card", "v1", "accounts"];

/// One logical accounts API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
    GetIbanInformation {
        iban: String,
    },
    GetBalance {
        account_number: String,
    },
    GetPaymentCards {
        filter: PaymentCardsFilter,
    },
    GetPaymentCardLimit {
        account_number: String,
    },
    CreateCard {
        request: CreatePaymentCardRequest,
    },
    ActivateCard {
        id: u64,
    },
    EnableCard {
        id: u64,
    },
    DeactivateCard {
        id: u64,
    },
    SetPaymentCardLimit {
        account_number: String,
        limit: UpdatePaymentCardLimitRequest,
    },
    RetrievePaymentCardPin {
        id: u64,
        cvv: String,
    },
    CancelPaymentCard {
        id: u64,
    },
}

impl Operation {
    /// Snake-case name of the operation, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetIbanInformation { .. } => "get_iban_information",
            Operation::GetBalance { .. } => "get_balance",
            Operation::GetPaymentCards { .. } => "get_payment_cards",
            Operation::GetPaymentCardLimit { .. } => "get_payment_card_limit",
            Operation::CreateCard { .. } => "create_card",
            Operation::ActivateCard { .. } => "activate_card",
            Operation::EnableCard { .. } => "enable_card",
            Operation::DeactivateCard { .. } => "deactivate_card",
            Operation::SetPaymentCardLimit { .. } => "set_payment_card_limit",
            Operation::RetrievePaymentCardPin { .. } => "retrieve_payment_card_pin",
            Operation::CancelPaymentCard { .. } => "cancel_payment_card",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::GetIbanInformation { .. }
            | Operation::GetBalance { .. }
            | Operation::GetPaymentCards { .. }
            | Operation::GetPaymentCardLimit { .. } => HttpMethod::Get,

            Operation::CreateCard { .. } => HttpMethod::Post,

            Operation::ActivateCard { .. }
            | Operation::EnableCard { .. }
            | Operation::DeactivateCard { .. }
            | Operation::SetPaymentCardLimit { .. }
            | Operation::RetrievePaymentCardPin { .. }
            | Operation::CancelPaymentCard { .. } => HttpMethod::Put,
        }
    }

    /// Endpoint path segments, relative to the API base URL. Each interpolated
    /// value is exactly one segment, unescaped.
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            Operation::GetIbanInformation { iban } => segments(SWIFT, Some(iban.as_str()), &[]),
            Operation::GetBalance { account_number } => {
                segments(ACCOUNTS, Some(account_number.as_str()), &["full-balance"])
            }
            Operation::GetPaymentCards { .. } | Operation::CreateCard { .. } => {
                segments(CARDS, None, &[])
            }
            Operation::GetPaymentCardLimit { account_number }
            | Operation::SetPaymentCardLimit { account_number, .. } => {
                segments(CARD_ACCOUNTS, Some(account_number.as_str()), &["card-limit"])
            }
            Operation::ActivateCard { id } => card_segments(*id, "activate"),
            Operation::EnableCard { id } => card_segments(*id, "enable"),
            Operation::DeactivateCard { id } => card_segments(*id, "deactivate"),
            Operation::RetrievePaymentCardPin { id, .. } => card_segments(*id, "pin"),
            Operation::CancelPaymentCard { id } => card_segments(*id, "cancel"),
        }
    }

    /// Endpoint path relative to the API base URL, with values inserted
    /// verbatim. Escaping happens when the router joins the segments onto the
    /// base URL.
    pub fn path(&self) -> String {
        format!("/{}", self.path_segments().join("/"))
    }

    /// Parameters to send with the request, or `None` when the endpoint
    /// takes none.
    pub fn parameters(&self) -> Result<Option<Parameters>, RouterError> {
        match self {
            Operation::GetPaymentCards { filter } => encoding::to_parameters(filter).map(Some),
            Operation::CreateCard { request } => encoding::to_parameters(request).map(Some),
            Operation::SetPaymentCardLimit { limit, .. } => {
                encoding::to_parameters(limit).map(Some)
            }
            Operation::RetrievePaymentCardPin { cvv, .. } => {
                let mut parameters = Parameters::new();
                parameters.insert("cvv2".to_string(), Value::String(cvv.clone()));
                Ok(Some(parameters))
            }
            Operation::GetIbanInformation { .. }
            | Operation::GetBalance { .. }
            | Operation::GetPaymentCardLimit { .. }
            | Operation::ActivateCard { .. }
            | Operation::EnableCard { .. }
            | Operation::DeactivateCard { .. }
            | Operation::CancelPaymentCard { .. } => Ok(None),
        }
    }
}

fn segments(prefix: &[&str], value: Option<&str>, suffix: &[&str]) -> Vec<String> {
    prefix
        .iter()
        .copied()
        .chain(value)
        .chain(suffix.iter().copied())
        .map(str::to_string)
        .collect()
}

fn card_segments(id: u64, action: &str) -> Vec<String> {
    segments(CARDS, Some(id.to_string().as_str()), &[action])
}
