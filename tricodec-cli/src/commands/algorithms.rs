//! Algorithms command implementation.

use crate::utils::CliResult;
use std::collections::BTreeMap;
use tricodec::{Algorithm, AlgorithmInfo};

/// Describe the supported algorithms.
pub fn cmd_algorithms(json: bool) -> CliResult<()> {
    if json {
        let infos: BTreeMap<&str, AlgorithmInfo> = Algorithm::ALL
            .into_iter()
            .map(|a| (a.name(), a.info()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    for algorithm in Algorithm::ALL {
        let info = algorithm.info();
        println!("{} ({}, .{})", info.name, algorithm, algorithm.extension());
        println!("  {}", info.description);
        println!("  Best for:  {}", info.best_for.join(", "));
        println!(
            "  Time:      {}    Space: {}",
            info.time_complexity, info.space_complexity
        );
        println!("  Features:  {}", info.features.join(", "));
        println!();
    }
    Ok(())
}
