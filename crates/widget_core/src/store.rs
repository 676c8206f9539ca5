use shared::domain::{Order, OrderId};

/// Snapshot of the orders the host last served. Replaced wholesale on every
/// successful fetch, never patched in place; within one render cycle it is
/// effectively immutable.
#[derive(Debug, Default, Clone)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    pub fn replace(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.get(id).is_some()
    }

    /// Orders in feed order, undated ones included.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
