//! Deterministic seat allocator.
//!
//! Walks the layout (blocks → floors → rooms, in input order) and consumes a
//! shuffled pool, placing two-seat benches so that branches differ whenever
//! the pool still allows it.

use tracing::{debug, trace};

use crate::policy::AllocationPolicy;
use crate::types::{BenchLabel, BenchWidth, Block, Floor, LayoutConfig, Room, SeatingAssignment, Student};

/// Pool of unseated students.
///
/// An index cursor over the shuffled sequence. Taken students leave a `None`
/// behind so the relative order of everyone else never changes, which keeps
/// the "first cross-branch student after the front" tie-break exact.
#[derive(Debug, Clone)]
pub struct Pool {
    slots: Vec<Option<Student>>,
    head: usize,
    remaining: usize,
}

impl Pool {
    /// Create a pool over students in allocation order.
    pub fn new(students: Vec<Student>) -> Self {
        let remaining = students.len();
        Self {
            slots: students.into_iter().map(Some).collect(),
            head: 0,
            remaining,
        }
    }

    /// Students still waiting for a seat.
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Whether everyone has been seated.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Index of the front student, advancing the cursor past taken slots.
    fn front(&mut self) -> Option<usize> {
        while self.head < self.slots.len() && self.slots[self.head].is_none() {
            self.head += 1;
        }
        (self.head < self.slots.len()).then_some(self.head)
    }

    /// Indices of waiting students after `idx`, in pool order.
    fn after(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        (idx + 1..self.slots.len()).filter(move |&i| self.slots[i].is_some())
    }

    fn branch(&self, idx: usize) -> Option<&str> {
        self.slots[idx].as_ref().map(|s| s.branch.as_str())
    }

    fn take(&mut self, idx: usize) -> Option<Student> {
        let student = self.slots.get_mut(idx)?.take()?;
        self.remaining -= 1;
        Some(student)
    }

    /// Remove and return the front student.
    pub fn pop_front(&mut self) -> Option<Student> {
        let idx = self.front()?;
        self.take(idx)
    }

    /// Remove and return a bench pair.
    ///
    /// The first element is the front student. The partner is the first
    /// later student of a different branch, or the next student in line if
    /// everyone left shares the front student's branch. The flag is `true`
    /// when the pair had to share a branch. Returns `None` with fewer than
    /// two students left.
    pub fn pop_pair(&mut self) -> Option<(Student, Student, bool)> {
        if self.remaining < 2 {
            return None;
        }
        let first = self.front()?;
        let branch = self.branch(first)?;

        let cross = self
            .after(first)
            .find(|&i| self.branch(i).is_some_and(|b| b != branch));
        let (partner, same_branch) = match cross {
            Some(i) => (i, false),
            None => (self.after(first).next()?, true),
        };

        let left = self.take(first)?;
        let right = self.take(partner)?;
        Some((left, right, same_branch))
    }
}

/// Result of an allocation pass.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Assignments sorted by hall ticket number.
    pub assignments: Vec<SeatingAssignment>,
    /// Students left in the pool once the layout was full.
    pub unseated: Vec<Student>,
    /// Total seats the layout offered.
    pub capacity: usize,
    /// Two-seat benches that had to pair one branch with itself.
    pub same_branch_benches: usize,
}

/// Seat allocator.
///
/// ## Algorithm
///
/// 1. Capacity ceiling = sum over rooms of `min(benches, max_benches_per_room) × seats`
/// 2. Visit rooms in layout order, stopping once the ceiling is reached or
///    the pool is empty
/// 3. Single-seat rooms take the pool front, bench `1, 2, 3, …`
/// 4. Two-seat rooms pair the front student with the first later student of
///    a different branch (`nL` / `nR`), falling back to the next student when
///    no other branch is left; a lone last student takes `nL`
/// 5. Sort assignments by hall ticket number (byte-wise)
pub struct SeatAllocator<'a> {
    policy: &'a AllocationPolicy,
}

struct Cursor {
    seated: usize,
    ceiling: usize,
    same_branch_benches: usize,
}

impl Cursor {
    fn full(&self) -> bool {
        self.seated >= self.ceiling
    }
}

impl<'a> SeatAllocator<'a> {
    /// Create an allocator for `policy`.
    pub fn new(policy: &'a AllocationPolicy) -> Self {
        Self { policy }
    }

    /// Seat as much of `pool` as the layout holds.
    pub fn allocate(&self, pool: Vec<Student>, layout: &LayoutConfig) -> Allocation {
        let mut pool = Pool::new(pool);
        let mut cursor = Cursor {
            seated: 0,
            ceiling: layout.capacity(self.policy),
            same_branch_benches: 0,
        };
        let mut assignments = Vec::with_capacity(pool.len().min(cursor.ceiling));

        for (block, floor, room) in layout.rooms() {
            if cursor.full() || pool.is_empty() {
                break;
            }
            let before = assignments.len();
            match room.students_per_bench {
                BenchWidth::Single => self.fill_single(block, floor, room, &mut pool, &mut cursor, &mut assignments),
                BenchWidth::Double => self.fill_double(block, floor, room, &mut pool, &mut cursor, &mut assignments),
            }
            debug!(
                block = %block.name,
                floor = %floor.number,
                room = %room.number,
                seated = assignments.len() - before,
                capacity = room.capacity(self.policy),
                "Room filled"
            );
        }

        assignments.sort_by(|a, b| a.student.hall_ticket_number.cmp(&b.student.hall_ticket_number));

        let mut unseated = Vec::with_capacity(pool.len());
        while let Some(student) = pool.pop_front() {
            unseated.push(student);
        }

        Allocation {
            assignments,
            unseated,
            capacity: cursor.ceiling,
            same_branch_benches: cursor.same_branch_benches,
        }
    }

    fn fill_single(
        &self,
        block: &Block,
        floor: &Floor,
        room: &Room,
        pool: &mut Pool,
        cursor: &mut Cursor,
        out: &mut Vec<SeatingAssignment>,
    ) {
        for bench in 1..=room.effective_benches(self.policy) {
            if cursor.full() {
                break;
            }
            let Some(student) = pool.pop_front() else { break };
            out.push(seat(student, block, floor, room, BenchLabel::Single(bench)));
            cursor.seated += 1;
        }
    }

    fn fill_double(
        &self,
        block: &Block,
        floor: &Floor,
        room: &Room,
        pool: &mut Pool,
        cursor: &mut Cursor,
        out: &mut Vec<SeatingAssignment>,
    ) {
        for bench in 1..=room.effective_benches(self.policy) {
            if cursor.full() || pool.is_empty() {
                break;
            }
            if pool.len() < 2 {
                if let Some(student) = pool.pop_front() {
                    out.push(seat(student, block, floor, room, BenchLabel::Left(bench)));
                    cursor.seated += 1;
                }
                break;
            }

            let Some((left, right, same_branch)) = pool.pop_pair() else { break };
            if same_branch {
                cursor.same_branch_benches += 1;
                trace!(
                    room = %room.number,
                    bench = bench,
                    branch = %left.branch,
                    "No other branch left, pairing within branch"
                );
            }
            out.push(seat(left, block, floor, room, BenchLabel::Left(bench)));
            out.push(seat(right, block, floor, room, BenchLabel::Right(bench)));
            cursor.seated += 2;
        }
    }
}

fn seat(student: Student, block: &Block, floor: &Floor, room: &Room, bench_number: BenchLabel) -> SeatingAssignment {
    SeatingAssignment {
        student,
        block: block.name.clone(),
        floor: floor.number.clone(),
        classroom: room.number.clone(),
        bench_number,
    }
}
