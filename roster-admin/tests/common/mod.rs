#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use roster_lib::error::{ApiError, Error};
use roster_lib::model::{Group, Member, Role};
use roster_lib::{DirectoryApi, MembershipApi};
use tokio::sync::Notify;

pub fn chess() -> Group {
    Group::new(10, "Chess")
}

pub fn choir() -> Group {
    Group::new(20, "Choir")
}

pub fn school() -> Vec<Member> {
    vec![
        Member::new("1", "Ada Lovelace", "ada@school.test", Role::Student).with_group(chess()),
        Member::new("2", "Alan Turing", "alan@school.test", Role::Teacher).with_group(choir()),
        Member::new("3", "Grace Hopper", "grace@school.test", Role::Admin),
    ]
}

/// In-memory school directory.
#[derive(Default)]
pub struct FakeDirectory {
    pub members: Mutex<Vec<Member>>,
    pub groups: Vec<Group>,
    pub fail_members: Mutex<bool>,
    pub member_calls: Mutex<usize>,
}

impl FakeDirectory {
    pub fn new(members: Vec<Member>, groups: Vec<Group>) -> Arc<Self> {
        Arc::new(Self {
            members: Mutex::new(members),
            groups,
            ..Default::default()
        })
    }

    pub fn set_members(&self, members: Vec<Member>) {
        *self.members.lock().unwrap() = members;
    }

    pub fn member_calls(&self) -> usize {
        *self.member_calls.lock().unwrap()
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
    async fn members(&self, _school_id: &str) -> Result<Vec<Member>, Error> {
        *self.member_calls.lock().unwrap() += 1;
        if *self.fail_members.lock().unwrap() {
            return Err(ApiError::http(503, "").into());
        }
        Ok(self.members.lock().unwrap().clone())
    }

    async fn groups(&self, _school_id: &str) -> Result<Vec<Group>, Error> {
        Ok(self.groups.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub assign: bool,
    pub school_id: String,
    pub group_id: i64,
    pub member_ids: Vec<i64>,
}

pub enum Reply {
    Ok,
    Http(u16, &'static str),
    Network,
}

/// Membership endpoint recording every call.
pub struct FakeMembership {
    pub calls: Mutex<Vec<Call>>,
    pub reply: Reply,
    /// When set, calls signal `started` and wait for `release`.
    pub gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl FakeMembership {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
            gate: None,
        })
    }

    pub fn gated(started: Arc<Notify>, release: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Ok,
            gate: Some((started, release)),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(
        &self,
        assign: bool,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.calls.lock().unwrap().push(Call {
            assign,
            school_id: school_id.to_string(),
            group_id,
            member_ids: member_ids.to_vec(),
        });
        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }
        match self.reply {
            Reply::Ok => Ok(()),
            Reply::Http(status, body) => Err(ApiError::http(status, body).into()),
            Reply::Network => Err(ApiError::Timeout(std::time::Duration::from_secs(30)).into()),
        }
    }
}

#[async_trait]
impl MembershipApi for FakeMembership {
    async fn add_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.record(true, school_id, group_id, member_ids).await
    }

    async fn remove_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.record(false, school_id, group_id, member_ids).await
    }
}
