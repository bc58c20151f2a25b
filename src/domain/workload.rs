use std::collections::HashMap;

use crate::domain::ticket::Ticket;

/// Open tickets per technician, limited to the technicians being tracked.
#[derive(Debug, Clone, Default)]
pub struct Workload {
    counts: HashMap<u64, usize>,
}

impl Workload {
    pub fn tally(technicians: &[u64], tickets: &[Ticket]) -> Self {
        let mut counts: HashMap<u64, usize> = technicians.iter().map(|id| (*id, 0)).collect();

        for responsible in tickets.iter().filter_map(Ticket::responsible_technician) {
            if let Some(count) = counts.get_mut(&responsible) {
                *count += 1;
            }
        }

        Self { counts }
    }

    pub fn count(&self, technician: u64) -> usize {
        self.counts.get(&technician).copied().unwrap_or(0)
    }
}
