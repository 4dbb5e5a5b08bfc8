pub mod dealer;
