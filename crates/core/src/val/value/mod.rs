mod into_json;
mod pick;
mod put;
