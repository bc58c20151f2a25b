pub mod agidesk;
