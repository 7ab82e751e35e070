mod credit;

pub use credit::{
    ensure_first_installment_within_limit, Credit, CreditDetails, CreditRequest, CreditStatus,
    CreditSummaryView, CreditView, NewCredit, MAX_INSTALLMENTS, MIN_INSTALLMENTS,
};
