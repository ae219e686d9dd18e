// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::CalendarEvent;

/// Horizontal slot of an event inside its day column.
///
/// A column is split into `count` equal lanes and the event occupies lane
/// `index`. Events that overlap nothing get the whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Lane {
    pub index: usize,
    pub count: usize,
}

impl Default for Lane {
    fn default() -> Self {
        Self { index: 0, count: 1 }
    }
}

impl Lane {
    /// Left edge and width as fractions of the column width.
    pub fn span(&self) -> (f64, f64) {
        let width = 1.0 / self.count as f64;
        (self.index as f64 * width, width)
    }
}

/// Assigns side-by-side lanes to the events of one column.
///
/// Events are grouped into clusters: an event joins the current cluster when
/// it [overlaps](CalendarEvent::overlaps) any of its members. Inside a
/// cluster each event takes the lowest lane free at its start,
/// visiting events by start hour with ties kept in input order. The result is
/// aligned with the input slice.
pub fn assign_lanes(events: &[&CalendarEvent]) -> Vec<Lane> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| events[a].start_hour.total_cmp(&events[b].start_hour));

    let mut lanes = vec![Lane::default(); events.len()];
    let mut cluster: Vec<usize> = Vec::new();
    let mut lane_ends: Vec<f64> = Vec::new(); // end hour of the last event in each lane

    for i in order {
        let event = events[i];
        if !cluster.is_empty() && !cluster.iter().any(|&j| events[j].overlaps(event)) {
            close_cluster(&mut lanes, &cluster, lane_ends.len());
            cluster.clear();
            lane_ends.clear();
        }

        let index = match lane_ends.iter().position(|&end| end <= event.start_hour) {
            Some(index) => {
                lane_ends[index] = event.end_hour();
                index
            }
            None => {
                lane_ends.push(event.end_hour());
                lane_ends.len() - 1
            }
        };

        lanes[i].index = index;
        cluster.push(i);
    }
    close_cluster(&mut lanes, &cluster, lane_ends.len());

    lanes
}

fn close_cluster(lanes: &mut [Lane], cluster: &[usize], count: usize) {
    for &i in cluster {
        lanes[i].count = count;
    }
}
