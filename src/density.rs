//! 1-D Voronoi density: the reciprocal of a pedestrian's personal space,
//! half the gap ahead plus half the gap behind.

#[inline]
fn voronoi(front: Option<f64>, back: Option<f64>) -> Option<f64> {
    let space = front? + back?;

    if space == 0.0 {
        None
    } else {
        Some(2.0 / space)
    }
}

/// On the periodic track the first pedestrian follows the last one.
pub fn top_view(headway: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = headway.len();

    (0..n)
        .map(|i| voronoi(headway[i], headway[(i + n - 1) % n]))
        .collect()
}

/// On a linear track nobody is behind the first pedestrian.
pub fn side_view(headway: &[Option<f64>]) -> Vec<Option<f64>> {
    (0..headway.len())
        .map(|i| {
            let back = if i == 0 { None } else { headway[i - 1] };
            voronoi(headway[i], back)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn top_view_uniform_spacing() {
        let rho = top_view(&[Some(2.0), Some(3.0), Some(2.0), Some(3.0)]);

        assert_eq!(rho.len(), 4);
        for r in rho {
            assert_relative_eq!(r.unwrap(), 0.4, epsilon = 1e-12);
        }
    }

    #[test]
    fn top_view_uses_predecessor_gap() {
        let h = [Some(1.0), Some(4.0), Some(0.5)];
        let rho = top_view(&h);

        assert_relative_eq!(rho[0].unwrap(), 2.0 / (1.0 + 0.5), epsilon = 1e-12);
        assert_relative_eq!(rho[1].unwrap(), 2.0 / (4.0 + 1.0), epsilon = 1e-12);
        assert_relative_eq!(rho[2].unwrap(), 2.0 / (0.5 + 4.0), epsilon = 1e-12);
    }

    #[test]
    fn single_pedestrian_on_loop() {
        let rho = top_view(&[Some(10.0)]);

        assert_relative_eq!(rho[0].unwrap(), 0.1, epsilon = 1e-12);
        assert!(top_view(&[]).is_empty());
    }

    #[test]
    fn side_view_edges_are_missing() {
        let rho = side_view(&[Some(2.0), Some(3.0), Some(1.0), None]);

        assert_eq!(rho[0], None);
        assert_relative_eq!(rho[1].unwrap(), 2.0 / 5.0, epsilon = 1e-12);
        assert_relative_eq!(rho[2].unwrap(), 2.0 / 4.0, epsilon = 1e-12);
        assert_eq!(rho[3], None);
    }

    #[test]
    fn coinciding_positions_are_missing() {
        assert_eq!(top_view(&[Some(0.0), Some(0.0)]), vec![None, None]);
    }
}
