//! Operation documents consumed from the indexer.

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const GET_STATS: Operation = Operation {
    name: "GetStats",
    document: r#"
  query GetStats {
    stats {
      currentBlockHeight
      totalTransactions
      totalAddresses
    }
  }
"#,
};

pub const SUBSCRIBE_STATS: Operation = Operation {
    name: "OnStatsUpdate",
    document: r#"
  subscription OnStatsUpdate {
    stats {
      currentBlockHeight
      totalTransactions
      totalAddresses
    }
  }
"#,
};

pub const GET_BLOCKS: Operation = Operation {
    name: "GetBlocks",
    document: r#"
  query GetBlocks($limit: Int, $offset: Int) {
    blocks(limit: $limit, offset: $offset) {
      items {
        number
        timestamp
        transactionCount
        createdAt
      }
      totalCount
    }
  }
"#,
};

pub const GET_BLOCK: Operation = Operation {
    name: "GetBlock",
    document: r#"
  query GetBlock($identifier: String!) {
    block(identifier: $identifier) {
      number
      timestamp
      transactionCount
      createdAt
    }
  }
"#,
};

pub const GET_BLOCK_DETAIL: Operation = Operation {
    name: "GetBlockDetail",
    document: r#"
  query GetBlockDetail($number: Int!) {
    blockDetail(number: $number) {
      number
      timestamp
      transactionCount
      createdAt
      parentHash
      gasUsed
      gasLimit
      miner
      difficulty
      totalDifficulty
      size
      extraData
      logsBloom
      mixHash
      nonce
      baseFeePerGas
      blockProcessedAt
    }
  }
"#,
};

pub const SUBSCRIBE_BLOCKS: Operation = Operation {
    name: "OnNewBlock",
    document: r#"
  subscription OnNewBlock {
    blocks {
      number
      timestamp
      transactionCount
      createdAt
    }
  }
"#,
};

pub const GET_TRANSACTIONS: Operation = Operation {
    name: "GetTransactions",
    document: r#"
  query GetTransactions($limit: Int, $offset: Int, $blockNumber: Int, $address: String) {
    transactions(limit: $limit, offset: $offset, blockNumber: $blockNumber, address: $address) {
      items {
        hash
        blockNumber
        position
        createdAt
        fromAddress
        toAddress
        value
        status
      }
      totalCount
    }
  }
"#,
};

pub const GET_TRANSACTION: Operation = Operation {
    name: "GetTransaction",
    document: r#"
  query GetTransaction($hash: String!) {
    transaction(hash: $hash) {
      hash
      blockNumber
      position
      createdAt
    }
  }
"#,
};

pub const GET_TRANSACTION_DETAIL: Operation = Operation {
    name: "GetTransactionDetail",
    document: r#"
  query GetTransactionDetail($hash: String!) {
    transactionDetail(hash: $hash) {
      hash
      blockNumber
      position
      createdAt
      fromAddress
      toAddress
      value
      gasUsed
      gasPrice
      maxFeePerGas
      maxPriorityFeePerGas
      effectiveGasPrice
      cumulativeGasUsed
      transactionFee
      nonce
      inputData
      status
      contractAddress
      logsCount
      methodId
      transactionType
      isBridgeTransaction
      bridgeDirection
      txProcessedAt
    }
  }
"#,
};

pub const SUBSCRIBE_TRANSACTIONS: Operation = Operation {
    name: "OnNewTransaction",
    document: r#"
  subscription OnNewTransaction {
    transactions {
      hash
      blockNumber
      position
      createdAt
    }
  }
"#,
};

pub const GET_ADDRESSES: Operation = Operation {
    name: "GetAddresses",
    document: r#"
  query GetAddresses($limit: Int, $offset: Int) {
    addresses(limit: $limit, offset: $offset) {
      items {
        address
        transactionCount
        balance
        isContract
        lastSeenAt
      }
      totalCount
    }
  }
"#,
};

pub const GET_ADDRESS_DETAIL: Operation = Operation {
    name: "GetAddressDetail",
    document: r#"
  query GetAddressDetail($address: String!) {
    addressDetail(address: $address) {
      address
      firstSeenBlock
      lastSeenBlock
      createdAt
      updatedAt
      transactionCountOut
      transactionCountIn
      totalSent
      totalReceived
      balance
      isContract
    }
  }
"#,
};

pub const GET_USER_GROWTH: Operation = Operation {
    name: "GetUserGrowth",
    document: r#"
  query GetUserGrowth {
    userGrowth {
      dataPoints {
        timestamp
        totalAddresses
        blockNumber
      }
    }
  }
"#,
};
