//! Loading a distance matrix from a city-pair CSV list.
//!
//! The expected layout is a header row followed by one undirected edge per
//! row:
//!
//! ```text
//! City1,City2,Distance(km)
//! Sarajevo,Zagreb,404
//! Sarajevo,Belgrade,298
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use super::types::DistanceMatrix;
use crate::error::{Result, TspError};

const HEADER: [&str; 3] = ["City1", "City2", "Distance(km)"];

/// A distance matrix together with the city names that label its rows.
///
/// Names belong to the reporting side only; solvers see the bare
/// [`DistanceMatrix`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityMatrix {
    /// City names, indexed like the matrix rows (order of first appearance).
    pub names: Vec<String>,
    /// Symmetric matrix; pairs absent from the list are `f64::INFINITY`.
    pub matrix: DistanceMatrix,
}

impl CityMatrix {
    /// Opens and parses a city-pair CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, max_cities: usize) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file, max_cities)
    }

    /// Parses a city-pair CSV list.
    ///
    /// Cities get indices in order of first appearance until `max_cities`
    /// have been seen; later cities are ignored along with every row that
    /// mentions one. Every row is still checked for well-formedness.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::matrix::CityMatrix;
    ///
    /// let data = "City1,City2,Distance(km)\nA,B,3\nB,C,4\nA,C,5\n";
    /// let cities = CityMatrix::from_csv_reader(data.as_bytes(), 10).unwrap();
    /// assert_eq!(cities.names, vec!["A", "B", "C"]);
    /// assert_eq!(cities.matrix.get(2, 0), 5.0);
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R, max_cities: usize) -> Result<Self> {
        if max_cities == 0 {
            return Err(TspError::invalid("max_cities must be at least 1"));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = rdr.records();

        let header = records
            .next()
            .ok_or_else(|| TspError::invalid("csv input is empty"))??;
        let header_ok = header.len() == HEADER.len()
            && header
                .iter()
                .zip(HEADER)
                .all(|(got, want)| got.eq_ignore_ascii_case(want));
        if !header_ok {
            return Err(TspError::invalid(format!(
                "csv header must be {}",
                HEADER.join(",")
            )));
        }

        let mut edges = Vec::new();
        for (line, record) in records.enumerate() {
            let record = record?;
            if record.len() != 3 {
                return Err(TspError::invalid(format!(
                    "row {} has {} fields, expected 3",
                    line + 2,
                    record.len()
                )));
            }
            let distance: f64 = record[2].parse().map_err(|_| {
                TspError::invalid(format!(
                    "row {}: '{}' is not a distance",
                    line + 2,
                    &record[2]
                ))
            })?;
            if distance.is_nan() || distance < 0.0 {
                return Err(TspError::invalid(format!(
                    "row {}: distance must be non-negative, got {distance}",
                    line + 2
                )));
            }
            edges.push((record[0].to_string(), record[1].to_string(), distance));
        }

        let mut names: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (a, b, _) in &edges {
            for city in [a, b] {
                if names.len() < max_cities && !index.contains_key(city) {
                    index.insert(city.clone(), names.len());
                    names.push(city.clone());
                }
            }
        }

        let n = names.len();
        if n == 0 {
            return Err(TspError::invalid("csv input lists no cities"));
        }

        let mut data = vec![f64::INFINITY; n * n];
        for i in 0..n {
            data[i * n + i] = 0.0;
        }

        let mut skipped = 0usize;
        for (a, b, d) in &edges {
            match (index.get(a), index.get(b)) {
                (Some(&i), Some(&j)) if i != j => {
                    data[i * n + j] = *d;
                    data[j * n + i] = *d;
                }
                (Some(_), Some(_)) => {}
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("skipped {skipped} rows naming cities beyond the first {max_cities}");
        }
        debug!("loaded {n} cities from {} csv rows", edges.len());

        Ok(Self {
            names,
            matrix: DistanceMatrix::from_flat(n, data)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALKANS: &str = "\
City1,City2,Distance(km)
Sarajevo,Zagreb,404
Sarajevo,Skopje,641
Sarajevo,Podgorica,244
Zagreb,Skopje,827
Zagreb,Podgorica,715
Skopje,Podgorica,333
";

    #[test]
    fn test_parse_symmetric_matrix() {
        let cities = CityMatrix::from_csv_reader(BALKANS.as_bytes(), 50).unwrap();
        assert_eq!(
            cities.names,
            vec!["Sarajevo", "Zagreb", "Skopje", "Podgorica"]
        );
        let m = &cities.matrix;
        assert_eq!(m.len(), 4);
        assert!(m.is_symmetric());
        assert_eq!(m.get(0, 1), 404.0);
        assert_eq!(m.get(3, 2), 333.0);
        assert_eq!(m.get(2, 2), 0.0);
    }

    #[test]
    fn test_missing_pair_is_infinite() {
        let data = "City1,City2,Distance(km)\nA,B,1\nB,C,2\n";
        let cities = CityMatrix::from_csv_reader(data.as_bytes(), 10).unwrap();
        assert!(cities.matrix.get(0, 2).is_infinite());
        assert!(cities.matrix.get(2, 0).is_infinite());
    }

    #[test]
    fn test_max_cities_caps_index() {
        let cities = CityMatrix::from_csv_reader(BALKANS.as_bytes(), 2).unwrap();
        assert_eq!(cities.names, vec!["Sarajevo", "Zagreb"]);
        assert_eq!(cities.matrix.len(), 2);
        assert_eq!(cities.matrix.get(1, 0), 404.0);
    }

    #[test]
    fn test_header_case_insensitive_and_trimmed() {
        let data = " city1 , CITY2 , distance(KM) \nA , B , 7.5\n";
        let cities = CityMatrix::from_csv_reader(data.as_bytes(), 10).unwrap();
        assert_eq!(cities.names, vec!["A", "B"]);
        assert_eq!(cities.matrix.get(0, 1), 7.5);
    }

    #[test]
    fn test_bad_header_rejected() {
        let data = "From,To,Km\nA,B,1\n";
        let err = CityMatrix::from_csv_reader(data.as_bytes(), 10).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_rows_rejected() {
        let wrong_width = "City1,City2,Distance(km)\nA,B\n";
        assert!(CityMatrix::from_csv_reader(wrong_width.as_bytes(), 10).is_err());

        let not_number = "City1,City2,Distance(km)\nA,B,far\n";
        assert!(CityMatrix::from_csv_reader(not_number.as_bytes(), 10).is_err());

        let negative = "City1,City2,Distance(km)\nA,B,-3\n";
        assert!(CityMatrix::from_csv_reader(negative.as_bytes(), 10).is_err());
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(CityMatrix::from_csv_reader("".as_bytes(), 10).is_err());
        let header_only = "City1,City2,Distance(km)\n";
        assert!(CityMatrix::from_csv_reader(header_only.as_bytes(), 10).is_err());
        assert!(CityMatrix::from_csv_reader(BALKANS.as_bytes(), 0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = CityMatrix::from_csv_path("/nonexistent/cities.csv", 10).unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
