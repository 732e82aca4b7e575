//! Hunt state machine: what the AI remembers about a ship it has found but
//! not yet sunk.

use std::collections::VecDeque;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{CellState, Coordinate, Direction, GuessResult};
use crate::grid::BoardView;

/// Phase of the current hunt, each variant holding only what is valid in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetingState {
    /// No ship located; decisions come from the value store or the heuristic.
    #[default]
    Searching,
    /// One hit; the anchor's untried neighbours are queued.
    Anchored {
        anchor: Coordinate,
        candidates: VecDeque<Coordinate>,
        hits: usize,
    },
    /// Two aligned hits fixed the ship's axis; `cursor` advances along
    /// `direction` on every further hit.
    Directed {
        anchor: Coordinate,
        cursor: Coordinate,
        direction: Direction,
        hits: usize,
        tried_opposite: bool,
    },
    /// The hunt ended; the next decision starts from `Searching`.
    Concluding,
}

impl TargetingState {
    /// Returns `true` while a located ship is being pursued.
    pub fn is_hunting(&self) -> bool {
        matches!(self, TargetingState::Anchored { .. } | TargetingState::Directed { .. })
    }

    pub fn anchor(&self) -> Option<Coordinate> {
        match self {
            TargetingState::Anchored { anchor, .. } | TargetingState::Directed { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Most recent hit on the current ship.
    pub fn cursor(&self) -> Option<Coordinate> {
        match self {
            TargetingState::Anchored { anchor, .. } => Some(*anchor),
            TargetingState::Directed { cursor, .. } => Some(*cursor),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            TargetingState::Directed { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// Untried neighbours of the anchor, in attack order.
    pub fn candidates(&self) -> Vec<Coordinate> {
        match self {
            TargetingState::Anchored { candidates, .. } => candidates.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    pub fn hits_on_current_ship(&self) -> usize {
        match self {
            TargetingState::Anchored { hits, .. } | TargetingState::Directed { hits, .. } => *hits,
            _ => 0,
        }
    }

    pub fn tried_opposite(&self) -> bool {
        matches!(self, TargetingState::Directed { tried_opposite: true, .. })
    }

    /// Drop the hunt entirely.
    pub fn reset(&mut self) {
        *self = TargetingState::Searching;
    }

    /// Start a hunt at `anchor`, queueing its unknown neighbours: the
    /// horizontal pair first, then the vertical pair, each pair shuffled.
    pub fn anchored_at<V, R>(view: &V, anchor: Coordinate, rng: &mut R) -> Self
    where
        V: BoardView + ?Sized,
        R: Rng + ?Sized,
    {
        let size = view.size();
        let mut candidates = VecDeque::with_capacity(4);
        for axis in [[Direction::Right, Direction::Left], [Direction::Down, Direction::Up]] {
            let mut pair: Vec<Coordinate> = axis
                .iter()
                .filter_map(|d| anchor.step(*d, size))
                .filter(|c| view.is_unknown(*c))
                .collect();
            pair.shuffle(rng);
            candidates.extend(pair);
        }
        TargetingState::Anchored {
            anchor,
            candidates,
            hits: 1,
        }
    }

    /// Next pursuit target, or `None` when no hunt can continue. A hunt that
    /// cannot produce a valid unknown cell is dropped back to `Searching`.
    pub fn next_target<V: BoardView + ?Sized>(&mut self, view: &V) -> Option<Coordinate> {
        if *self == TargetingState::Concluding {
            self.reset();
            return None;
        }
        if let Some(anchor) = self.anchor() {
            if view.cell(anchor) != Some(CellState::Hit) {
                warn!("anchor {} is no longer a hit; dropping hunt", anchor);
                self.reset();
                return None;
            }
        }

        let size = view.size();
        let target = match self {
            TargetingState::Searching | TargetingState::Concluding => None,
            TargetingState::Anchored { candidates, .. } => {
                let next = loop {
                    match candidates.pop_front() {
                        Some(c) if view.is_unknown(c) => break Some(c),
                        Some(c) => debug!("skipping stale candidate {}", c),
                        None => break None,
                    }
                };
                if next.is_none() {
                    debug!("anchor neighbours exhausted; hunt concluded");
                }
                next
            }
            TargetingState::Directed {
                anchor,
                cursor,
                direction,
                tried_opposite,
                ..
            } => {
                let ahead = cursor
                    .step(*direction, size)
                    .filter(|c| view.is_unknown(*c));
                if ahead.is_some() {
                    ahead
                } else if !*tried_opposite {
                    *direction = direction.opposite();
                    *cursor = *anchor;
                    *tried_opposite = true;
                    debug!("reversing to {:?} from anchor {}", direction, anchor);
                    anchor.step(*direction, size).filter(|c| view.is_unknown(*c))
                } else {
                    None
                }
            }
        };

        if target.is_none() && self.is_hunting() {
            self.reset();
        }
        target
    }

    /// Advance the hunt with the outcome of an attack at `coord`.
    ///
    /// Hits join the hunt only next to the anchor or one step ahead on the
    /// line; anything else leaves it as it was.
    pub fn record<V, R>(&mut self, view: &V, coord: Coordinate, result: GuessResult, max_ship_length: usize, rng: &mut R)
    where
        V: BoardView + ?Sized,
        R: Rng + ?Sized,
    {
        if let GuessResult::Sink(name) = result {
            debug!("{} sunk at {}; hunt concluded", name, coord);
            *self = TargetingState::Concluding;
            return;
        }

        let size = view.size();
        let next = match (core::mem::take(self), result.is_hit()) {
            (TargetingState::Searching | TargetingState::Concluding, true) => {
                debug!("first contact at {}", coord);
                Self::anchored_at(view, coord, rng)
            }
            (TargetingState::Anchored { anchor, candidates, hits }, true) => {
                match Direction::ALL.into_iter().find(|d| anchor.step(*d, size) == Some(coord)) {
                    Some(direction) => {
                        debug!("second hit at {}; heading {:?}", coord, direction);
                        TargetingState::Directed {
                            anchor,
                            cursor: coord,
                            direction,
                            hits: hits + 1,
                            tried_opposite: false,
                        }
                    }
                    None => {
                        warn!("hit at {} is not next to anchor {}; hunt unchanged", coord, anchor);
                        TargetingState::Anchored { anchor, candidates, hits }
                    }
                }
            }
            (
                TargetingState::Directed {
                    anchor,
                    cursor,
                    direction,
                    hits,
                    tried_opposite,
                },
                hit,
            ) if cursor.step(direction, size) != Some(coord) => {
                if hit {
                    warn!("hit at {} is off the line {} {:?}; hunt unchanged", coord, cursor, direction);
                }
                TargetingState::Directed {
                    anchor,
                    cursor,
                    direction,
                    hits,
                    tried_opposite,
                }
            }
            (
                TargetingState::Directed {
                    anchor,
                    direction,
                    hits,
                    tried_opposite,
                    ..
                },
                true,
            ) => TargetingState::Directed {
                anchor,
                cursor: coord,
                direction,
                hits: hits + 1,
                tried_opposite,
            },
            (
                TargetingState::Directed {
                    anchor,
                    direction,
                    hits,
                    tried_opposite: false,
                    ..
                },
                false,
            ) => TargetingState::Directed {
                anchor,
                cursor: anchor,
                direction: direction.opposite(),
                hits,
                tried_opposite: true,
            },
            (TargetingState::Directed { .. }, false) => {
                debug!("both directions from the anchor exhausted");
                TargetingState::Concluding
            }
            (state, false) => state,
        };

        *self = if next.hits_on_current_ship() >= max_ship_length {
            debug!("hit count reached {}; hunt concluded", max_ship_length);
            TargetingState::Concluding
        } else {
            next
        };
    }
}
