use std::fs;
use std::io::{self, Read, Write};

use edgeplan_core::parse_catalogue;
use edgeplan_solver::SolveOptions;
use tracing::info;

pub fn run(input: &str, output: &str, progress: u64) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let catalogue = parse_catalogue(&text)?;
    info!(
        videos = catalogue.videos.len(),
        endpoints = catalogue.endpoints.len(),
        requests = catalogue.requests.len(),
        caches = catalogue.cache_count,
        capacity = catalogue.cache_capacity,
        "catalogue loaded"
    );

    let options = SolveOptions { progress_interval: progress };
    let assignment = edgeplan_solver::solve(&catalogue, &options);

    let rendered = assignment.to_string();
    if output == "-" {
        io::stdout().write_all(rendered.as_bytes())?;
    } else {
        fs::write(output, rendered)?;
    }
    Ok(())
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
5 2 4 3 100
50 50 80 30 110
1000 3
0 100
2 200
1 300
500 0
3 0 1500
0 1 1000
4 0 500
1 0 1000
";

    #[test]
    fn solve_writes_the_assignment_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("example.in");
        let output = dir.path().join("example.out");
        fs::write(&input, EXAMPLE).unwrap();

        run(input.to_str().unwrap(), output.to_str().unwrap(), 0).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "3\n0 3 1\n1\n2\n");
    }

    #[test]
    fn malformed_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.in");
        let output = dir.path().join("bad.out");
        fs::write(&input, "3 1").unwrap();

        assert!(run(input.to_str().unwrap(), output.to_str().unwrap(), 0).is_err());
        assert!(!output.exists());
    }
}
