/// LIFO of saved continuations.
///
/// A frame pushed here stands for "resume this later"; popping it resumes the work. Dropping a
/// frame (by popping it without pushing it back, or by [`Stack::clear`]) releases whatever it
/// owns.
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_last_in_first_out() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.peek(), Some(&3));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_peek_mut_updates_top_in_place() {
        let mut stack = Stack::new();
        stack.push((0, 0));
        if let Some(top) = stack.peek_mut() {
            top.1 += 1;
        }
        assert_eq!(stack.pop(), Some((0, 1)));
    }

    #[test]
    fn test_clear_releases_owned_buffers() {
        let buffer = Rc::new(vec![1u32; 16]);
        let mut stack = Stack::new();
        stack.push(Rc::clone(&buffer));
        stack.push(Rc::clone(&buffer));
        assert_eq!(Rc::strong_count(&buffer), 3);
        stack.clear();
        assert_eq!(Rc::strong_count(&buffer), 1);
    }
}
