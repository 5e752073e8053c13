pub mod invoices;
pub mod ledger;
pub mod references;
pub mod scenarios;
pub mod taxes;
