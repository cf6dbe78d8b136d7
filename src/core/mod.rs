pub mod add;
pub mod calculator;
pub mod clock;
pub mod del;
pub mod log;
pub mod logic;
pub mod month_view;
pub mod punch;
pub mod replace;
pub mod validator;
pub mod work_date;
