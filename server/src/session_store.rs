use std::collections::HashMap;

pub type GameId = u64;

/// Records keyed by an id that is handed out once and never reused.
#[derive(Debug, Clone)]
pub struct SessionStore<T> {
    sessions: HashMap<GameId, T>,
    next_id: GameId,
}

impl<T> SessionStore<T> {
    pub fn new() -> SessionStore<T> {
        SessionStore {
            sessions: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn insert(&mut self, record: T) -> (GameId, &mut T) {
        let game_id = self.next_id;
        self.next_id += 1;
        let record = self.sessions.entry(game_id).or_insert(record);
        (game_id, record)
    }

    pub fn get(&self, game_id: GameId) -> Option<&T> {
        self.sessions.get(&game_id)
    }

    pub fn get_mut(&mut self, game_id: GameId) -> Option<&mut T> {
        self.sessions.get_mut(&game_id)
    }

    pub fn remove(&mut self, game_id: GameId) -> Option<T> {
        self.sessions.remove(&game_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        SessionStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut store = SessionStore::new();
        let (a, _) = store.insert("a");
        let (b, _) = store.insert("b");
        assert_ne!(a, b);
        assert_eq!(store.remove(b), Some("b"));
        let (c, _) = store.insert("c");
        assert!(c != a && c != b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unknown_id_is_none() {
        let mut store: SessionStore<u8> = SessionStore::new();
        assert!(store.get(3).is_none());
        assert!(store.get_mut(3).is_none());
        assert!(store.remove(3).is_none());
    }

    #[test]
    fn records_are_isolated_by_id() {
        let mut store = SessionStore::new();
        let (a, _) = store.insert(1);
        let (b, _) = store.insert(1);
        *store.get_mut(a).unwrap() += 5;
        assert_eq!(store.get(a), Some(&6));
        assert_eq!(store.get(b), Some(&1));
    }
}
