use crate::{domain::greeting::GreetingBook, worker::reply::Reply};

const UNKNOWN_GREETING: &str = "unknown";

pub fn set(book: &mut GreetingBook, caller: &str, name: &str) -> Reply {
    book.set(caller, name);
    Reply::new("setGreeting", caller, Ok(String::new()))
}

pub fn get(book: &GreetingBook, account: &str) -> Reply {
    let name = book.get(account).unwrap_or(UNKNOWN_GREETING);
    Reply::new("getGreeting", account, Ok(name.to_owned()))
}
