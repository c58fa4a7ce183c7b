use melee_core::Pid;
use std::collections::BTreeSet;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Tracks which live connection is bound to which player id.
///
/// One binding per pid: a reconnect replaces the previous session, and
/// the stale bridge loop finds its sender dropped. Bindings carry a
/// session token so a late disconnect from a replaced session cannot
/// unbind its successor.
#[derive(Debug, Default)]
pub struct SessionHub {
    seq: u64,
    sessions: HashMap<Pid, (u64, UnboundedSender<String>)>,
}

impl SessionHub {
    /// Binds a session to a pid, returning its token. Any previous
    /// binding for the same pid is replaced.
    pub fn bind(&mut self, pid: &str, tx: UnboundedSender<String>) -> u64 {
        self.seq += 1;
        if self.sessions.insert(pid.to_string(), (self.seq, tx)).is_some() {
            log::debug!("[hub] {} reconnected, replacing session", pid);
        }
        self.seq
    }
    /// Removes a binding iff the token still matches.
    pub fn unbind(&mut self, pid: &str, token: u64) -> bool {
        match self.sessions.get(pid) {
            Some((current, _)) if *current == token => {
                self.sessions.remove(pid);
                true
            }
            _ => false,
        }
    }
    /// Currently connected player ids.
    pub fn connected(&self) -> BTreeSet<Pid> {
        self.sessions.keys().cloned().collect()
    }
    /// Sends a message to one player's session, if bound.
    pub fn unicast(&self, pid: &str, json: String) {
        if let Some((_, tx)) = self.sessions.get(pid) {
            if tx.send(json).is_err() {
                log::warn!("[hub] unicast to {} failed", pid);
            }
        }
    }
    /// Sends a per-recipient message to every bound session.
    pub fn fan_out<F>(&self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for (pid, (_, tx)) in &self.sessions {
            if tx.send(f(pid)).is_err() {
                log::warn!("[hub] broadcast to {} failed", pid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn reconnect_replaces_binding() {
        let mut hub = SessionHub::default();
        let (tx1, mut rx1) = unbounded_channel();
        let (tx2, mut rx2) = unbounded_channel();
        let t1 = hub.bind("p", tx1);
        let t2 = hub.bind("p", tx2);
        hub.unicast("p", "hello".into());
        assert!(rx1.try_recv().is_err());
        assert_eq!(rx2.try_recv().unwrap(), "hello");
        // the replaced session's late disconnect is a no-op
        assert!(!hub.unbind("p", t1));
        assert_eq!(hub.connected().len(), 1);
        assert!(hub.unbind("p", t2));
        assert!(hub.connected().is_empty());
    }

    #[test]
    fn fan_out_is_per_recipient() {
        let mut hub = SessionHub::default();
        let (tx_p, mut rx_p) = unbounded_channel();
        let (tx_q, mut rx_q) = unbounded_channel();
        hub.bind("p", tx_p);
        hub.bind("q", tx_q);
        hub.fan_out(|pid| format!("for {}", pid));
        assert_eq!(rx_p.try_recv().unwrap(), "for p");
        assert_eq!(rx_q.try_recv().unwrap(), "for q");
    }
}
