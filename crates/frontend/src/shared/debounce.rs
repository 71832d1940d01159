//! Debounce и защита от устаревших ответов.
//!
//! Таймеры здесь не создаются: вызывающий код ждёт `TimeoutFuture` и
//! потом спрашивает `Debouncer::take`, сработал ли именно его вызов.

/// Пропускает только последнее значение, переданное в пределах окна ожидания
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    ticket: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            ticket: 0,
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запомнить новое значение; предыдущее ожидающее значение отбрасывается
    pub fn push(&mut self, value: T) -> u64 {
        self.ticket += 1;
        self.pending = Some(value);
        self.ticket
    }

    /// Забрать значение по истечении окна. `None`, если после этого
    /// вызова был более поздний `push` или значение уже забрано.
    pub fn take(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.ticket {
            return None;
        }
        self.pending.take()
    }

    /// Отменить ожидающее значение
    pub fn cancel(&mut self) {
        self.ticket += 1;
        self.pending = None;
    }
}

/// Монотонный номер запроса: отображается только ответ на последний запрос
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Номер для нового запроса
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Ответ на запрос `seq` ещё актуален
    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Сделать устаревшими все запросы в полёте
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_pushes_fire_once_with_last_value() {
        let mut debouncer = Debouncer::new();
        let tickets: Vec<u64> = ["те", "тел", "теле"]
            .iter()
            .map(|term| debouncer.push(term.to_string()))
            .collect();

        // Каждый таймер просыпается и пробует забрать значение
        let fired: Vec<String> = tickets.iter().filter_map(|t| debouncer.take(*t)).collect();
        assert_eq!(fired, vec!["теле".to_string()]);
    }

    #[test]
    fn test_value_taken_only_once() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.push(1);
        assert_eq!(debouncer.take(ticket), Some(1));
        assert_eq!(debouncer.take(ticket), None);
    }

    #[test]
    fn test_separate_windows_fire_separately() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.push("a");
        assert_eq!(debouncer.take(first), Some("a"));
        let second = debouncer.push("b");
        assert_eq!(debouncer.take(second), Some("b"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.push("a");
        debouncer.cancel();
        assert_eq!(debouncer.take(ticket), None);
    }

    #[test]
    fn test_sequence_accepts_only_latest() {
        let mut seq = RequestSequence::new();
        let slow = seq.issue();
        let fast = seq.issue();
        assert!(seq.is_latest(fast));
        // Медленный ответ пришёл позже быстрого: отбрасывается
        assert!(!seq.is_latest(slow));

        seq.invalidate();
        assert!(!seq.is_latest(fast));
    }
}
