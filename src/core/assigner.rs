use crate::domain::model::{Assignment, ExclusionRelation, Pairing, Roster};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// An attempt ran out of receivers for `giver`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no valid receiver left for {giver}")]
pub struct Infeasible {
    pub giver: String,
}

/// One greedy pass over the roster.
///
/// Givers are taken in roster order and each draws uniformly from the
/// receivers still unassigned, minus themselves and their exclusions. The
/// attempt is abandoned as soon as a giver has nothing left to draw; a
/// different random path might still have succeeded, which is what
/// [`RetryDriver`](crate::core::retry::RetryDriver) is for.
pub fn attempt<R: Rng + ?Sized>(
    roster: &Roster,
    exclusions: &ExclusionRelation,
    rng: &mut R,
) -> Result<Assignment, Infeasible> {
    // Vec keeps roster order so seeded draws are reproducible.
    let mut remaining: Vec<&str> = roster.names().collect();
    let mut pairs = Vec::with_capacity(roster.len());

    for giver in roster.names() {
        let excluded = exclusions.excluded_for(giver);
        let possible: Vec<&str> = remaining
            .iter()
            .copied()
            .filter(|receiver| *receiver != giver && !excluded.contains(*receiver))
            .collect();

        let Some(&receiver) = possible.choose(rng) else {
            tracing::debug!("No valid receiver for {}", giver);
            return Err(Infeasible {
                giver: giver.to_string(),
            });
        };

        remaining.retain(|r| *r != receiver);
        pairs.push(Pairing {
            giver: giver.to_string(),
            receiver: receiver.to_string(),
        });
    }

    Ok(Assignment::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Participant;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::VecDeque;

    /// Replays fixed 32-bit words, then zeros. A word of `ceil(i * 2^32 / n)`
    /// selects index `i` out of `n` candidates.
    struct ScriptedRng(VecDeque<u32>);

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.0.pop_front().unwrap_or(0)
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|n| Participant::new(*n, format!("+1555{}", n)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_three_participants_with_fixed_draws_succeed_in_one_attempt() {
        let roster = roster(&["A", "B", "C"]);
        let exclusions = ExclusionRelation::new();
        // A picks the second of [B, C]; B and C each have a single option left.
        let mut rng = ScriptedRng(VecDeque::from([0x8000_0000, 0, 0]));

        let assignment = attempt(&roster, &exclusions, &mut rng).unwrap();
        assert_eq!(assignment.receiver_for("A"), Some("C"));
        assert_eq!(assignment.receiver_for("B"), Some("A"));
        assert_eq!(assignment.receiver_for("C"), Some("B"));
        assert_eq!(assignment.verify(&roster, &exclusions), Ok(()));
    }

    #[test]
    fn test_three_participants_only_dead_end_on_last_giver() {
        let roster = roster(&["A", "B", "C"]);
        let exclusions = ExclusionRelation::new();

        let mut successes = 0;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            match attempt(&roster, &exclusions, &mut rng) {
                Ok(assignment) => {
                    successes += 1;
                    assert_eq!(assignment.verify(&roster, &exclusions), Ok(()));
                }
                // A->B, B->A leaves C with only itself
                Err(err) => assert_eq!(err.giver, "C"),
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn test_first_choice_draws_pair_up_neighbours() {
        let roster = roster(&["A", "B", "C", "D"]);
        let mut rng = ScriptedRng(VecDeque::new());
        let assignment = attempt(&roster, &ExclusionRelation::new(), &mut rng).unwrap();

        let pairs: Vec<(&str, &str)> = assignment
            .iter()
            .map(|p| (p.giver.as_str(), p.receiver.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "A"), ("C", "D"), ("D", "C")]);
    }

    #[test]
    fn test_single_participant_fails() {
        let roster = roster(&["A"]);
        let mut rng = StdRng::seed_from_u64(7);
        let err = attempt(&roster, &ExclusionRelation::new(), &mut rng).unwrap_err();
        assert_eq!(err.giver, "A");
    }

    #[test]
    fn test_mutually_excluded_pair_fails_on_first_giver() {
        let roster = roster(&["A", "B"]);
        let exclusions: ExclusionRelation =
            [("A", vec!["B"]), ("B", vec!["A"])].into_iter().collect();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let err = attempt(&roster, &exclusions, &mut rng).unwrap_err();
            assert_eq!(err.giver, "A");
        }
    }

    #[test]
    fn test_two_participants_swap() {
        let roster = roster(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1);
        let assignment = attempt(&roster, &ExclusionRelation::new(), &mut rng).unwrap();
        assert_eq!(assignment.receiver_for("A"), Some("B"));
        assert_eq!(assignment.receiver_for("B"), Some("A"));
    }

    #[test]
    fn test_exclusions_are_respected() {
        let roster = roster(&["A", "B", "C", "D", "E", "F"]);
        let exclusions: ExclusionRelation = [
            ("A", vec!["B"]),
            ("B", vec!["A"]),
            ("C", vec!["D"]),
            ("D", vec!["C"]),
            ("E", vec!["F", "A"]),
        ]
        .into_iter()
        .collect();

        let mut successes = 0;
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Ok(assignment) = attempt(&roster, &exclusions, &mut rng) {
                successes += 1;
                assert_eq!(assignment.verify(&roster, &exclusions), Ok(()));
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let roster = roster(&["A", "B", "C", "D", "E"]);
        let exclusions: ExclusionRelation = [("A", vec!["E"])].into_iter().collect();

        for seed in 0..20 {
            let first = attempt(&roster, &exclusions, &mut StdRng::seed_from_u64(seed));
            let second = attempt(&roster, &exclusions, &mut StdRng::seed_from_u64(seed));
            assert_eq!(first, second);
        }
    }
}
