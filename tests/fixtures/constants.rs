pub const TEST_LENDER_ID: &str = "alice";
pub const TEST_BORROWER_ID: &str = "bob";

pub const TEST_LENDER_SEED: u8 = 1;
pub const TEST_BORROWER_SEED: u8 = 2;
pub const TEST_OUTSIDER_SEED: u8 = 9;

pub const TEST_VALUE: i64 = 50;
