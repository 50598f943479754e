pub mod table;
pub mod json;

use crate::backup::BackupEntry;

pub fn print(entries: &[BackupEntry], json_output: bool) {
    if json_output {
        println!("{}", json::render(entries));
    } else {
        print!("{}", table::render(entries));
    }
}
