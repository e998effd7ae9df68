/// Live-store tests against a MySQL instance holding `fmsca_records`
pub mod db_tests;
