//! Running score for the current session.

use bevy::prelude::*;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameScore {
    pub points: i32,
}

impl GameScore {
    pub fn add(&mut self, points: i32) {
        self.points = self.points.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn score_saturates_instead_of_overflowing() {
        let mut score = GameScore {
            points: i32::MAX - 5,
        };

        score.add(10);
        assert_eq!(score.points, i32::MAX);

        score.add(10);
        assert_eq!(score.points, i32::MAX);
    }
}
