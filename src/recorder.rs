use crate::types::{Crate, CrateId, LoadingInstruction, LoadingPlan, Orientation, Position};

/// Instructions for the crates on the current search path.
#[derive(Debug, Default)]
pub struct InstructionRecorder {
    plan: LoadingPlan,
}

impl InstructionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Step number is the mapping size at insertion plus one, so a crate re-placed
    /// after a backtrack gets the step of its place on the current path.
    pub fn record(
        &mut self,
        c: &Crate,
        orientation: &Orientation,
        at: Position,
    ) -> LoadingInstruction {
        let (turn_horizontal, turn_vertical) = orientation.turns(&c.dims);
        let instruction = LoadingInstruction {
            step: self.plan.len() + 1,
            crate_id: c.id,
            x: at.x,
            y: at.y,
            z: at.z,
            turn_horizontal,
            turn_vertical,
            placed: orientation.dims,
        };
        self.plan.instructions.insert(c.id, instruction);
        instruction
    }

    pub fn remove(&mut self, id: CrateId) -> Option<LoadingInstruction> {
        self.plan.instructions.remove(&id)
    }

    pub fn into_plan(self) -> LoadingPlan {
        self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dims;

    fn upright(c: &Crate) -> Orientation {
        Orientation {
            crate_id: c.id,
            dims: c.dims,
        }
    }

    #[test]
    fn test_steps_follow_mapping_size() {
        let a = Crate::new(10, 1, 1, 1);
        let b = Crate::new(20, 1, 1, 1);
        let c = Crate::new(30, 1, 1, 1);

        let mut rec = InstructionRecorder::new();
        assert_eq!(rec.record(&a, &upright(&a), Position::new(0, 0, 0)).step, 1);
        assert_eq!(rec.record(&b, &upright(&b), Position::new(1, 0, 0)).step, 2);

        rec.remove(b.id);
        assert_eq!(rec.len(), 1);

        // Re-placement after a backtrack reuses the path position, not a global counter.
        assert_eq!(rec.record(&c, &upright(&c), Position::new(1, 0, 0)).step, 2);
        assert_eq!(rec.record(&b, &upright(&b), Position::new(2, 0, 0)).step, 3);
    }

    #[test]
    fn test_records_turns_and_position() {
        let c = Crate::new(1, 2, 3, 4);
        let turned = Orientation {
            crate_id: 1,
            dims: Dims::new(4, 3, 2),
        };
        let mut rec = InstructionRecorder::new();
        let i = rec.record(&c, &turned, Position::new(5, 6, 7));
        assert!(i.turn_horizontal);
        assert!(!i.turn_vertical);
        assert_eq!(i.position(), Position::new(5, 6, 7));
        assert_eq!(i.placed, Dims::new(4, 3, 2));

        let plan = rec.into_plan();
        assert_eq!(plan.get(1), Some(&i));
    }
}
