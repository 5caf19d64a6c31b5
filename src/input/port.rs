//! Code for reading port-related information from CSV files.
use super::read_csv_id_file;
use crate::port::PortMap;
use anyhow::Result;
use std::path::Path;

const PORTS_FILE_NAME: &str = "ports.csv";

/// Reads ports from a CSV file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A map of ports keyed by port ID, in file order, or an error
pub fn read_ports(model_dir: &Path) -> Result<PortMap> {
    read_csv_id_file(&model_dir.join(PORTS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Port;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// Create an example ports file in dir_path
    fn create_ports_file(dir_path: &Path) {
        let file_path = dir_path.join(PORTS_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(
            file,
            "id,name
VVO,Vladivostok
KSK,Korsakov"
        )
        .unwrap();
    }

    #[test]
    fn test_read_ports() {
        let dir = tempdir().unwrap();
        create_ports_file(dir.path());
        let ports = read_ports(dir.path()).unwrap();
        assert_eq!(
            ports,
            PortMap::from([
                (
                    "VVO".into(),
                    Port {
                        id: "VVO".into(),
                        name: "Vladivostok".into(),
                    }
                ),
                (
                    "KSK".into(),
                    Port {
                        id: "KSK".into(),
                        name: "Korsakov".into(),
                    }
                ),
            ])
        );
    }
}
