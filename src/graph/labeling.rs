use crate::geometry::{distance, Coordinate};
use crate::label::NodeLabel;
use crate::profile::MazeProfile;

/// Names nodes from the profile's layout templates.
///
/// Structural labels are placed greedily in template order: each takes the
/// still-unnamed node closest to its ideal position inside the bounding box
/// of all nodes. The leftovers receive the trailing labels in ascending x
/// order. Returns one entry per input position; `None` when the profile ran
/// out of labels.
pub(crate) fn assign_labels(
    positions: &[Coordinate],
    profile: &MazeProfile,
) -> Vec<Option<NodeLabel>> {
    let mut labels = vec![None; positions.len()];
    if positions.is_empty() {
        return labels;
    }

    let (min, max) = bounding_box(positions);
    let span = max - min;

    for template in &profile.label_templates {
        let ideal = Coordinate::new(
            min.x + template.rel[0] * span.x,
            min.y + template.rel[1] * span.y,
        );
        let best = positions
            .iter()
            .enumerate()
            .filter(|(i, _)| labels[*i].is_none())
            .map(|(i, p)| (i, distance(p, &ideal)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some((i, _)) => labels[i] = Some(template.label),
            None => break,
        }
    }

    let mut rest: Vec<usize> = (0..positions.len())
        .filter(|&i| labels[i].is_none())
        .collect();
    rest.sort_by(|&a, &b| {
        positions[a]
            .x
            .partial_cmp(&positions[b].x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, label) in rest.into_iter().zip(profile.trailing_labels.iter().copied()) {
        labels[i] = Some(label);
    }

    labels
}

fn bounding_box(positions: &[Coordinate]) -> (Coordinate, Coordinate) {
    let mut min = positions[0];
    let mut max = positions[0];
    for p in &positions[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeLabel::*;

    fn p(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn canonical_layout_gets_expected_labels() {
        // Deliberately shuffled input order.
        let positions = vec![
            p(500.0, 100.0), // B
            p(100.0, 900.0), // N1
            p(500.0, 628.0), // N3
            p(900.0, 100.0), // A
            p(500.0, 900.0), // Start
            p(100.0, 100.0), // C
            p(900.0, 900.0), // N2
            p(500.0, 420.0), // N4
        ];
        let labels = assign_labels(&positions, &MazeProfile::default());
        assert_eq!(
            labels,
            vec![
                Some(B),
                Some(N1),
                Some(N3),
                Some(A),
                Some(Start),
                Some(C),
                Some(N2),
                Some(N4)
            ]
        );
    }

    #[test]
    fn few_nodes_receive_structural_labels_first() {
        let positions = vec![p(0.0, 10.0), p(10.0, 10.0), p(5.0, 0.0)];
        let labels = assign_labels(&positions, &MazeProfile::default());
        // Bounding box (0,0)-(10,10): Start ideal (5,10) ties between the
        // two bottom nodes and takes the first.
        assert_eq!(labels[0], Some(Start));
        assert!(labels.iter().all(Option::is_some));
        let mut unique: Vec<_> = labels.iter().flatten().collect();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn trailing_labels_follow_ascending_x() {
        let mut positions = vec![
            p(500.0, 900.0),
            p(100.0, 900.0),
            p(900.0, 900.0),
            p(500.0, 628.0),
            p(500.0, 420.0),
        ];
        positions.push(p(800.0, 100.0));
        positions.push(p(200.0, 100.0));
        let labels = assign_labels(&positions, &MazeProfile::default());
        assert_eq!(labels[5], Some(B));
        assert_eq!(labels[6], Some(C));
    }

    #[test]
    fn empty_input_yields_no_labels() {
        assert!(assign_labels(&[], &MazeProfile::default()).is_empty());
    }
}
