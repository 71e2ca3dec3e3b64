//! Version command

use site_update::BuildInfo;

use crate::cli::VersionArgs;
use crate::output;

pub fn run(args: VersionArgs) -> i32 {
    let info = BuildInfo::current();

    if args.json {
        match serde_json::to_string_pretty(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                output::error(&format!("failed to serialize version info: {}", e));
                return 1;
            }
        }
    } else {
        println!("{}", info);
    }

    0
}
