use crate::Error;
use pcst_types::Edge;

pub(crate) fn validate(
    edges: &[Edge],
    prizes: &[f64],
    costs: &[f64],
    root: Option<usize>,
    num_clusters: usize,
) -> Result<(), Error> {
    let n = prizes.len();

    if edges.len() != costs.len() {
        return Err(Error::InvalidInput(format!(
            "edges and costs have different lengths ({} vs {})",
            edges.len(),
            costs.len()
        )));
    }

    for (i, edge) in edges.iter().enumerate() {
        if edge.u >= n || edge.v >= n {
            return Err(Error::InvalidInput(format!(
                "edge {i} references vertex out of range ({}, {}) with n={n}",
                edge.u, edge.v
            )));
        }
        if edge.u == edge.v {
            return Err(Error::InvalidInput(format!(
                "edge {i} is a self-loop on vertex {}",
                edge.u
            )));
        }
    }

    for (i, &cost) in costs.iter().enumerate() {
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidInput(format!(
                "edge {i} has negative or non-finite cost {cost}"
            )));
        }
    }

    for (v, &prize) in prizes.iter().enumerate() {
        if !prize.is_finite() || prize < 0.0 {
            return Err(Error::InvalidInput(format!(
                "vertex {v} has negative or non-finite prize {prize}"
            )));
        }
    }

    if num_clusters == 0 {
        return Err(Error::InvalidInput(
            "num_clusters must be at least 1".into(),
        ));
    }

    if let Some(r) = root {
        if r >= n {
            return Err(Error::InvalidInput(format!(
                "root {r} is out of range for n={n}"
            )));
        }
        if num_clusters != 1 {
            return Err(Error::InvalidInput(format!(
                "num_clusters must be 1 when a root is given, got {num_clusters}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_loop() {
        let err = validate(&[Edge::new(0, 0)], &[1.0, 1.0], &[1.0], None, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let err = validate(&[Edge::new(0, 5)], &[1.0, 1.0], &[1.0], None, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_negative_prize() {
        let err = validate(&[], &[-1.0], &[], None, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_root_with_multiple_clusters() {
        let err = validate(&[], &[1.0, 1.0], &[], Some(0), 2).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_zero_num_clusters() {
        let err = validate(&[], &[1.0], &[], None, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn accepts_well_formed_input() {
        validate(&[Edge::new(0, 1)], &[1.0, 1.0], &[0.5], None, 1).unwrap();
    }
}
